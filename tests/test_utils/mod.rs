pub mod fixtures;

pub use fixtures::{ScriptedComparator, async_test_frames};
