//! Circular turn order over a fixed table

/// Index of the first seat after `from` (wrapping) that satisfies `is_active`.
///
/// The scan visits every other seat once and finally `from` itself, so a
/// lone active seat rotates to itself. With no active seat at all, `from`
/// is returned unchanged.
pub fn next_active_seat<T>(seats: &[T], from: usize, is_active: impl Fn(&T) -> bool) -> usize {
    let len = seats.len();
    (1..=len)
        .map(|step| (from + step) % len)
        .find(|&idx| is_active(&seats[idx]))
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(active: &[bool], from: usize) -> usize {
        next_active_seat(active, from, |a| *a)
    }

    #[test]
    fn test_steps_to_neighbour() {
        let all = [true; 4];
        assert_eq!(next(&all, 0), 1);
        assert_eq!(next(&all, 2), 3);
        assert_eq!(next(&all, 3), 0);
    }

    #[test]
    fn test_skips_inactive_seats() {
        let active = [true, false, false, true];
        assert_eq!(next(&active, 0), 3);
        assert_eq!(next(&active, 3), 0);
        // Starting from an inactive seat still lands on an active one
        assert_eq!(next(&active, 1), 3);
    }

    #[test]
    fn test_lone_seat_rotates_to_itself() {
        let active = [false, false, true, false];
        assert_eq!(next(&active, 2), 2);
        assert_eq!(next(&active, 0), 2);
    }

    #[test]
    fn test_no_active_seat_returns_start() {
        let active = [false; 3];
        assert_eq!(next(&active, 1), 1);
    }

    #[test]
    fn test_full_rotation_visits_every_active_seat_once() {
        let configs: [&[bool]; 4] = [
            &[true, true],
            &[true, false, true, true],
            &[false, true, false, true, true, false],
            &[true, true, true, true, true],
        ];

        for active in configs {
            let expected = active.iter().filter(|a| **a).count();
            let start = active.iter().position(|a| *a).unwrap();

            let mut seen = Vec::new();
            let mut idx = start;
            for _ in 0..expected {
                idx = next(active, idx);
                assert!(active[idx], "landed on inactive seat {idx}");
                assert!(!seen.contains(&idx), "seat {idx} repeated early");
                seen.push(idx);
            }
            assert_eq!(idx, start, "rotation did not close");
        }
    }
}
