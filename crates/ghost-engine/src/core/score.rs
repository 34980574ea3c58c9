/// Scene score. Only ever grows while a scene is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Score(u32);

impl Score {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Add `points`, saturating. Returns the new total.
    pub fn add(&mut self, points: u32) -> u32 {
        self.0 = self.0.saturating_add(points);
        self.0
    }
}
