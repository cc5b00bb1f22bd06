pub mod audio;
pub mod edit;
pub mod edl;
pub mod video;
