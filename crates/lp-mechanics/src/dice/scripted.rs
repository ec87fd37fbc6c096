//! Replay of a fixed face sequence.

use super::{D20, FaceSource};

/// Replays a fixed list of faces, wrapping around when exhausted.
///
/// Used to replay a known table roll and to drive the engine in tests.
#[derive(Debug, Clone)]
pub struct ScriptedFaces {
    faces: Vec<u32>,
    drawn: usize,
}

impl ScriptedFaces {
    /// Create a script. Returns `None` if the list is empty or any face is
    /// outside `1..=20`.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Option<Self> {
        let faces: Vec<u32> = faces.into_iter().collect();
        if faces.is_empty() || faces.iter().any(|f| !(1..=D20).contains(f)) {
            return None;
        }
        Some(Self { faces, drawn: 0 })
    }

    /// A script that always yields the same face.
    pub fn constant(face: u32) -> Option<Self> {
        Self::new([face])
    }

    /// Parse a comma-separated list such as `"20, 1, 15"`.
    pub fn parse(list: &str) -> Option<Self> {
        let faces: Option<Vec<u32>> = list
            .split(',')
            .map(|s| s.trim().parse::<u32>().ok())
            .collect();
        Self::new(faces?)
    }

    /// How many faces have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl FaceSource for ScriptedFaces {
    fn roll_d20(&mut self) -> u32 {
        let face = self.faces[self.drawn % self.faces.len()];
        self.drawn += 1;
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_and_wraps() {
        let mut dice = ScriptedFaces::new([3, 20, 1]).unwrap();
        let faces: Vec<u32> = (0..5).map(|_| dice.roll_d20()).collect();
        assert_eq!(faces, vec![3, 20, 1, 3, 20]);
        assert_eq!(dice.drawn(), 5);
    }

    #[test]
    fn rejects_empty_and_out_of_range() {
        assert!(ScriptedFaces::new(Vec::new()).is_none());
        assert!(ScriptedFaces::new([0]).is_none());
        assert!(ScriptedFaces::new([21]).is_none());
        assert!(ScriptedFaces::constant(20).is_some());
    }

    #[test]
    fn parse_list() {
        let mut dice = ScriptedFaces::parse("20, 1,15").unwrap();
        assert_eq!(dice.roll_d20(), 20);
        assert_eq!(dice.roll_d20(), 1);
        assert_eq!(dice.roll_d20(), 15);
        assert!(ScriptedFaces::parse("20,x").is_none());
        assert!(ScriptedFaces::parse("").is_none());
    }
}
