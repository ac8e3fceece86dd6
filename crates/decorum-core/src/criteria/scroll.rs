use crate::{error::CriteriaError, expr::Value, mode::ScrollMode};

///
/// ScrollableResults
///
/// Cursor over materialized rows.
/// The cursor starts before the first row; `get` is `None` until a move
/// lands on a row.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScrollableResults {
    rows: Vec<Value>,
    mode: ScrollMode,
    position: Option<usize>,
}

impl ScrollableResults {
    #[must_use]
    pub const fn new(rows: Vec<Value>, mode: ScrollMode) -> Self {
        Self {
            rows,
            mode,
            position: None,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    #[must_use]
    pub const fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Zero-based row index of the cursor, if it is on a row.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position.filter(|idx| *idx < self.rows.len())
    }

    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        self.position.and_then(|idx| self.rows.get(idx))
    }

    /// Advance to the next row. Returns false once past the last row.
    pub fn next(&mut self) -> bool {
        let next = self.position.map_or(0, |idx| idx.saturating_add(1));
        self.land(next)
    }

    pub fn previous(&mut self) -> Result<bool, CriteriaError> {
        self.ensure_backwards("previous")?;

        Ok(match self.position {
            Some(idx) if idx > 0 => self.land(idx - 1),
            _ => {
                self.position = None;
                false
            }
        })
    }

    pub fn first(&mut self) -> Result<bool, CriteriaError> {
        if self.position.is_some_and(|idx| idx > 0) {
            self.ensure_backwards("first")?;
        }

        Ok(self.land(0))
    }

    /// Jump to the last row; allowed on forward-only cursors.
    pub fn last(&mut self) -> bool {
        match self.rows.len() {
            0 => false,
            len => self.land(len - 1),
        }
    }

    fn land(&mut self, idx: usize) -> bool {
        if idx < self.rows.len() {
            self.position = Some(idx);
            true
        } else {
            self.position = Some(self.rows.len());
            false
        }
    }

    fn ensure_backwards(&self, op: &str) -> Result<(), CriteriaError> {
        if self.mode.can_move_backwards() {
            Ok(())
        } else {
            Err(CriteriaError::cursor_unsupported(format!(
                "cannot call {op}() on a forward-only cursor"
            )))
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Value> {
        self.rows
    }
}
