#[cfg(test)]
mod tests {
    use pocket::{create_scheduler, create_shared_state, Scheduler};
    use std::sync::Arc;

    #[test]
    fn test_scheduler_with_shared_state() {
        let scheduler = create_scheduler();
        let shared_state = create_shared_state();
        let writer_state = Arc::clone(&shared_state);

        let handle = scheduler
            .spawn("pocket-writer", move || {
                writer_state.write(-2.5, 64.0);
            })
            .unwrap();
        handle.join().unwrap();

        let snapshot = shared_state.read();
        assert_eq!(snapshot.deviation_ms, -2.5);
        assert_eq!(snapshot.position_ppq, 64.0);
    }

    #[test]
    fn test_multiple_scheduler_tasks() {
        let scheduler = create_scheduler();
        let shared_state = create_shared_state();

        let position_state = Arc::clone(&shared_state);
        let first = scheduler
            .spawn("pocket-position", move || position_state.write_position(12.0))
            .unwrap();
        first.join().unwrap();

        let deviation_state = Arc::clone(&shared_state);
        let second = scheduler
            .spawn("pocket-deviation", move || {
                deviation_state.write_deviation(1.5);
                deviation_state.read()
            })
            .unwrap();

        let seen = second.join().unwrap();
        assert_eq!(seen.position_ppq, 12.0);
        assert_eq!(seen.deviation_ms, 1.5);
    }
}
