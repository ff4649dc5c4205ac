//! Constants used throughout the application

/// Number of landmarks in one hand pose sample
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Landmark id of the wrist
pub const WRIST: usize = 0;

/// Landmark id of the thumb tip
pub const THUMB_TIP: usize = 4;

/// Landmark id of the index fingertip
pub const INDEX_TIP: usize = 8;

/// Values emitted per landmark by the hand landmark model (x, y, z)
pub const LANDMARK_DIMENSIONS: usize = 3;

/// Wireframe connections between landmark ids
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (5, 6), (6, 7), (7, 8),
    (9, 10), (10, 11), (11, 12),
    (13, 14), (14, 15), (15, 16),
    (17, 18), (18, 19), (19, 20),
    (0, 5), (5, 9), (9, 13), (13, 17), (0, 17),
];

/// Default tracking parameters
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.5;
pub const DEFAULT_MOVEMENT_SCALE: f64 = 2.4;
pub const DEFAULT_FRAME_SKIP: u32 = 3;
pub const DEFAULT_PERSIST_FRAMES: u32 = 5;
pub const DEFAULT_CLICK_THRESHOLD: f64 = 0.05;
pub const DEFAULT_EDGE_MARGIN: f64 = 10.0;

/// Default camera resolution, kept low so detection keeps up
pub const DEFAULT_CAMERA_WIDTH: i32 = 480;
pub const DEFAULT_CAMERA_HEIGHT: i32 = 360;

/// Default hand landmark model input size
pub const DEFAULT_DETECTOR_INPUT_SIZE: i32 = 224;

/// Default minimum hand presence score
pub const DEFAULT_PRESENCE_THRESHOLD: f32 = 0.4;
