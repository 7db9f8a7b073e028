//! Video output constants
//!
//! File extensions and codec tags used for recordings and snapshots.

/// Recording container and codec
pub mod recording {
    /// Container extension for recordings
    pub const VIDEO_EXTENSION: &str = "avi";
    /// FourCC of the recording codec (Xvid MPEG-4)
    pub const FOURCC: [char; 4] = ['X', 'V', 'I', 'D'];
}

/// Still image output
pub mod snapshot {
    /// Extension for snapshots; the encoder is picked from it
    pub const IMAGE_EXTENSION: &str = "png";
}
