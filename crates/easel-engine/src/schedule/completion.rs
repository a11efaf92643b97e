use std::cell::RefCell;
use std::rc::Rc;

/// How an asynchronous operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
}

impl Outcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Observer side of a settle-once cell. Cheap to clone; every clone sees the
/// same outcome.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    cell: Rc<RefCell<Option<Outcome>>>,
}

/// Settling side of a [`Completion`]. Consumed by settling, so an operation
/// settles at most once.
#[derive(Debug)]
pub struct Completer {
    cell: Rc<RefCell<Option<Outcome>>>,
}

impl Completion {
    /// A pending completion and the handle that settles it.
    pub fn pair() -> (Completer, Completion) {
        let cell = Rc::new(RefCell::new(None));
        (Completer { cell: cell.clone() }, Completion { cell })
    }

    /// An already-settled completion.
    pub fn settled(outcome: Outcome) -> Self {
        Self { cell: Rc::new(RefCell::new(Some(outcome))) }
    }

    pub fn is_settled(&self) -> bool {
        self.cell.borrow().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.cell.borrow().clone()
    }

    pub fn succeeded(&self) -> bool {
        self.cell.borrow().as_ref().is_some_and(Outcome::is_success)
    }
}

impl Completer {
    pub fn settle(self, outcome: Outcome) {
        *self.cell.borrow_mut() = Some(outcome);
    }

    pub fn succeed(self) {
        self.settle(Outcome::Succeeded);
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.settle(Outcome::Failed(reason.into()));
    }
}
