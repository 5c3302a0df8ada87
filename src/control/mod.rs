pub mod cancel;
pub mod playback;
pub mod stepper;
