//! Shared constants for sheet composition
//!
//! This module centralizes the magic numbers used throughout the
//! composition process. All dimensions are in PDF points.

// =============================================================================
// Standard Sheet Sizes
// =============================================================================

/// ISO A4 portrait width in points
pub const A4_WIDTH_PT: f32 = 595.276;

/// ISO A4 portrait height in points
pub const A4_HEIGHT_PT: f32 = 841.89;

/// A4 dimensions as tuple (width, height)
pub const A4_DIMENSIONS: (f32, f32) = (A4_WIDTH_PT, A4_HEIGHT_PT);

/// ISO A3 portrait width in points
pub const A3_WIDTH_PT: f32 = 841.89;

/// ISO A3 portrait height in points
pub const A3_HEIGHT_PT: f32 = 1190.551;

/// Sheet substituted when a size computation produces garbage
pub const FALLBACK_SHEET_DIMENSIONS: (f32, f32) = (A3_WIDTH_PT, A3_HEIGHT_PT);

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter), used when a MediaBox is missing
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Layout Tuning
// =============================================================================

/// Per-axis tolerance when deciding a page already matches A4 (points)
pub const STANDARD_SIZE_TOLERANCE_PT: f32 = 10.0;

/// Height ratio above which a mixed pair gets corrective width scaling
pub const PAIR_HEIGHT_RATIO_LIMIT: f32 = 1.5;

/// Smallest fit scale the grid path accepts without blending
pub const MIN_DIRECT_SCALE: f32 = 0.8;

/// Weight applied to the averaged scale when blending
pub const BLEND_SCALE_FACTOR: f32 = 0.9;

/// Upper scale cap for paired pages
pub const MAX_PAIR_SCALE: f32 = 1.2;

// =============================================================================
// Drawing
// =============================================================================

/// Line width for page outlines (points)
pub const BORDER_LINE_WIDTH: f32 = 1.0;

/// Stroke gray level for page outlines (0 = black, 1 = white)
pub const BORDER_GRAY: f32 = 0.75;

/// Line width for the error-sheet border (points)
pub const ERROR_BORDER_LINE_WIDTH: f32 = 2.0;

/// Inset of the error-sheet border from the page edge (points)
pub const ERROR_BORDER_INSET_PT: f32 = 10.0;

/// Font size for the placeholder notice (points)
pub const NOTICE_FONT_SIZE: f32 = 14.0;

/// Font size for the error notice (points)
pub const ERROR_FONT_SIZE: f32 = 12.0;

/// Left margin of notice text (points)
pub const NOTICE_MARGIN_PT: f32 = 50.0;

/// Distance of the first notice line from the sheet top (points)
pub const NOTICE_TOP_OFFSET_PT: f32 = 100.0;

/// Vertical distance between notice lines (points)
pub const NOTICE_LINE_SPACING: f32 = 18.0;
