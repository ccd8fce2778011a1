//! Simulated switch matrix for tests on host

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::hal_ext::pins::{MatrixPin, PinMode};
use super::matrix::Matrix;

/// Operation performed on a row pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mode(usize, PinMode),
    Write(usize, bool),
}

struct State {
    closed: Vec<Vec<bool>>,
    row_modes: Vec<PinMode>,
    row_levels: Vec<bool>,
    col_modes: Vec<PinMode>,
    ops: Vec<Op>,
}

/// Handle to the simulated board shared with its pins
#[derive(Clone)]
pub struct Board {
    state: Rc<RefCell<State>>,
}

pub struct RowPin {
    state: Rc<RefCell<State>>,
    i: usize,
}

pub struct ColPin {
    state: Rc<RefCell<State>>,
    j: usize,
}

pub type SimMatrix<const NROWS: usize, const NCOLS: usize> = Matrix<RowPin, ColPin, NROWS, NCOLS>;

const ROW_LABELS: [&str; 8] = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7"];
const COL_LABELS: [&str; 8] = ["C0", "C1", "C2", "C3", "C4", "C5", "C6", "C7"];

impl Board {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        let state = State {
            closed: vec![vec![false; ncols]; nrows],
            // GPIO reset state: input, output latch low
            row_modes: vec![PinMode::Input; nrows],
            row_levels: vec![false; nrows],
            col_modes: vec![PinMode::Input; ncols],
            ops: Vec::new(),
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    pub fn rows<const NROWS: usize>(&self) -> [RowPin; NROWS] {
        core::array::from_fn(|i| RowPin { state: self.state.clone(), i })
    }

    pub fn cols<const NCOLS: usize>(&self) -> [ColPin; NCOLS] {
        core::array::from_fn(|j| ColPin { state: self.state.clone(), j })
    }

    pub fn matrix<const NROWS: usize, const NCOLS: usize>(&self, has_diodes: bool) -> SimMatrix<NROWS, NCOLS> {
        Matrix::new(self.rows(), self.cols(), has_diodes)
    }

    pub fn close(&self, row: usize, col: usize) {
        self.state.borrow_mut().closed[row][col] = true;
    }

    pub fn open(&self, row: usize, col: usize) {
        self.state.borrow_mut().closed[row][col] = false;
    }

    pub fn open_all(&self) {
        for row in self.state.borrow_mut().closed.iter_mut() {
            row.fill(false);
        }
    }

    pub fn row_mode(&self, i: usize) -> PinMode {
        self.state.borrow().row_modes[i]
    }

    pub fn row_level(&self, i: usize) -> bool {
        self.state.borrow().row_levels[i]
    }

    pub fn col_mode(&self, j: usize) -> PinMode {
        self.state.borrow().col_modes[j]
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.state.borrow_mut().ops.clear();
    }
}

impl MatrixPin for RowPin {
    fn set_mode(&mut self, mode: PinMode) {
        let mut state = self.state.borrow_mut();
        state.row_modes[self.i] = mode;
        state.ops.push(Op::Mode(self.i, mode));
    }

    fn write(&mut self, level: bool) {
        let mut state = self.state.borrow_mut();
        state.row_levels[self.i] = level;
        state.ops.push(Op::Write(self.i, level));
    }

    fn read(&self) -> bool {
        let state = self.state.borrow();
        state.row_modes[self.i] != PinMode::Output || state.row_levels[self.i]
    }

    fn label(&self) -> &'static str {
        ROW_LABELS[self.i]
    }
}

impl MatrixPin for ColPin {
    fn set_mode(&mut self, mode: PinMode) {
        self.state.borrow_mut().col_modes[self.j] = mode;
    }

    fn write(&mut self, _level: bool) {}

    fn read(&self) -> bool {
        let state = self.state.borrow();
        let driven_low = (0..state.closed.len()).any(|i| {
            state.closed[i][self.j]
                && state.row_modes[i] == PinMode::Output
                && !state.row_levels[i]
        });
        !driven_low
    }

    fn label(&self) -> &'static str {
        COL_LABELS[self.j]
    }
}
