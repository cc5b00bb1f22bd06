pub mod audio;
pub mod config;
pub mod edl;
pub mod interval;
pub mod timeline;
pub mod video;
