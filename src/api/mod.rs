mod scrollytelling;

pub use scrollytelling::{Scrollytelling, StoryUpdate};
