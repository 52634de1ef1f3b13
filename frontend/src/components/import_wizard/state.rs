//! Component state for the import wizard.
//!
//! All step logic lives in `common::import::wizard::WizardState`; this
//! struct adds only what rendering and cancellation need: DOM refs, the
//! drag-over highlight, and a shared copy of the generation counter that
//! running poll loops read to stop themselves after a reset.

use std::cell::Cell;
use std::rc::Rc;

use common::import::wizard::WizardState;
use yew::prelude::*;

pub struct ImportWizard {
    /// The pure step machine.
    pub wizard: WizardState,
    /// Hidden file input behind the "choose file" button.
    pub file_input_ref: NodeRef,
    /// True while a file is dragged over the drop zone.
    pub drag_active: bool,
    /// Mirror of `wizard.generation` readable from spawned tasks. A poll
    /// loop captures the value it started under and exits as soon as the
    /// cell moves on.
    pub live_generation: Rc<Cell<u32>>,
}

impl ImportWizard {
    pub fn new() -> Self {
        let wizard = WizardState::new();
        let live_generation = Rc::new(Cell::new(wizard.generation));
        Self {
            wizard,
            file_input_ref: NodeRef::default(),
            drag_active: false,
            live_generation,
        }
    }

    /// Keeps the shared counter in sync after any machine mutation.
    pub fn sync_generation(&self) {
        self.live_generation.set(self.wizard.generation);
    }

    /// Whether `generation` still identifies the current wizard run.
    pub fn is_current(&self, generation: u32) -> bool {
        self.wizard.generation == generation
    }
}
