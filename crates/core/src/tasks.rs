//! Task color management
//!
//! Gives every task name a stable terminal color so that task headers stay
//! recognizable across runs.

use colored::*;

/// Jewel tones that read as labels rather than log levels
const TASK_PALETTE: [(u8, u8, u8); 6] = [
    (147, 112, 219), // medium slate blue
    (64, 224, 208),  // turquoise
    (255, 140, 0),   // dark orange
    (199, 21, 133),  // medium violet red
    (72, 209, 204),  // medium turquoise
    (138, 43, 226),  // blue violet
];

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    let (r, g, b) = TASK_PALETTE[(hash % TASK_PALETTE.len() as u64) as usize];
    Color::TrueColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_color_is_stable() {
        assert_eq!(get_task_color("elm-bundle"), get_task_color("elm-bundle"));
    }

    #[test]
    fn test_task_color_comes_from_palette() {
        for name in ["elm-init", "elm-bundle", "format", ""] {
            match get_task_color(name) {
                Color::TrueColor { r, g, b } => assert!(TASK_PALETTE.contains(&(r, g, b))),
                other => panic!("unexpected color: {other:?}"),
            }
        }
    }
}
