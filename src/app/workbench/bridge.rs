use super::Workbench;
use crate::kernel::{Action, Effect};

impl Workbench {
    pub(super) fn dispatch_kernel(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        self.run_effects(result.effects);
        result.state_changed
    }

    pub(super) fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RunCheck(request) => self.executor.submit(request),
            Effect::MoveCaret { .. } | Effect::ShowTooltip { .. } | Effect::HideTooltip => {
                self.effects.push(effect);
            }
        }
    }
}
