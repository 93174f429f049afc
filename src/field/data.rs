use std::ops::Range;

use super::CellSpace;

/// A multi-component cell centred array. Components ("channels") are stored
/// one after another, each spanning the whole `CellSpace` including ghosts.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData<const N: usize> {
    space: CellSpace<N>,
    depth: usize,
    data: Vec<f64>,
}

impl<const N: usize> FieldData<N> {
    pub fn new(space: CellSpace<N>, depth: usize) -> Self {
        Self {
            space,
            depth,
            data: vec![0.0; depth * space.num_cells()],
        }
    }

    pub fn space(&self) -> &CellSpace<N> {
        &self.space
    }

    pub fn ghost(&self) -> usize {
        self.space.ghost
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn channels(&self) -> Range<usize> {
        0..self.depth
    }

    pub fn channel(&self, channel: usize) -> &[f64] {
        let stride = self.space.num_cells();
        &self.data[stride * channel..stride * (channel + 1)]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f64] {
        let stride = self.space.num_cells();
        &mut self.data[stride * channel..stride * (channel + 1)]
    }

    pub fn get(&self, channel: usize, cell: [isize; N]) -> f64 {
        self.channel(channel)[self.space.index_from_cell(cell)]
    }

    pub fn set(&mut self, channel: usize, cell: [isize; N], value: f64) {
        let index = self.space.index_from_cell(cell);
        self.channel_mut(channel)[index] = value;
    }

    /// Sets every cell (ghosts included) of a channel to a value.
    pub fn fill(&mut self, channel: usize, value: f64) {
        self.channel_mut(channel).fill(value);
    }

    pub fn storage(&self) -> &[f64] {
        &self.data
    }
}
