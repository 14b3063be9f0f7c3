/// Deterministic temporary-name generator for cross-stage result handoff.
///
/// spec.md §4.4 step 7 says a fresh name is "4 random lowercase letters",
/// but §9 Design Notes re-architects this explicitly: "A single counter
/// scoped to a compilation context removes the chance of collisions and is
/// deterministic under test." This generator implements that resolution
/// (DESIGN.md Open Question decisions) — a plain incrementing counter,
/// base-26-letter encoded so names still read as identifiers.
#[derive(Debug, Default)]
pub struct TempNameGenerator {
    next: u32,
}

impl TempNameGenerator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Produce the next name, e.g. `__stage_a`, `__stage_b`, ..., `__stage_z`,
    /// `__stage_ba`, ...
    pub fn next_name(&mut self) -> String {
        let mut n = self.next;
        self.next += 1;

        let mut letters = Vec::new();
        loop {
            letters.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
            n -= 1;
        }
        letters.reverse();
        format!("__stage_{}", letters.into_iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names_are_distinct_and_deterministic() {
        let mut gen1 = TempNameGenerator::new();
        let names1: Vec<_> = (0..30).map(|_| gen1.next_name()).collect();

        let mut gen2 = TempNameGenerator::new();
        let names2: Vec<_> = (0..30).map(|_| gen2.next_name()).collect();

        assert_eq!(names1, names2);

        let unique: std::collections::HashSet<_> = names1.iter().collect();
        assert_eq!(unique.len(), names1.len());
    }

    #[test]
    fn test_first_names() {
        let mut gen = TempNameGenerator::new();
        assert_eq!(gen.next_name(), "__stage_a");
        assert_eq!(gen.next_name(), "__stage_b");
    }
}
