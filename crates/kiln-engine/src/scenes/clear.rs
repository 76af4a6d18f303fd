use crate::core::Scene;

/// Window variant: the frame is the background clear and nothing else.
#[derive(Debug, Default, Copy, Clone)]
pub struct ClearOnly;

impl Scene for ClearOnly {
    fn name(&self) -> &'static str {
        "hello-window"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{FrameCommands, ObjectId, ReleaseLog};

    #[test]
    fn records_nothing() {
        let mut frame = FrameCommands::new();
        ClearOnly.record(&mut frame);
        assert!(frame.is_empty());
    }

    #[test]
    fn owns_no_objects() {
        assert!(ClearOnly.program(ObjectId(1)).is_none());
        assert!(ClearOnly.buffer(ObjectId(1)).is_none());

        let mut log = ReleaseLog::new();
        ClearOnly.release(&mut log);
        assert!(log.is_empty());
    }
}
