//! Property: whatever the number of controls, Tab from the last wraps to
//! the first, Shift+Tab from the first wraps to the last, and every other
//! position is left to the browser.

use proptest::prelude::*;

use super::fake_dom::FakeDom;
use crate::components::modal::ModalController;
use crate::dom::{DomHost, KeyOutcome, KeyPress};

fn dialog_with_buttons(count: usize) -> String {
    let buttons: String = (0..count)
        .map(|i| format!(r#"<button id="b{i}">Button {i}</button>"#))
        .collect();
    format!(r#"<div id="modal"><p>Pick one</p>{buttons}</div>"#)
}

#[test]
fn tab_cycles_within_any_sized_dialog() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = (2usize..10, any::<prop::sample::Index>(), any::<bool>());

    runner
        .run(&strategy, |(count, pick, shift)| {
            let dom = FakeDom::new(&dialog_with_buttons(count));
            let modal = ModalController::for_selector(dom.clone(), "#modal").expect("dialog element");
            modal.activate(None).expect("slot free");

            let position = pick.index(count);
            let focused = dom.by_id(&format!("b{position}"));
            dom.focus(&focused);

            let press = if shift { KeyPress::with_shift("Tab") } else { KeyPress::new("Tab") };
            let outcome = dom.press(press);

            let wraps = (shift && position == 0) || (!shift && position == count - 1);
            if wraps {
                let expected = if shift { count - 1 } else { 0 };
                prop_assert_eq!(outcome, KeyOutcome::Handled);
                prop_assert_eq!(dom.active(), Some(dom.by_id(&format!("b{expected}"))));
            } else {
                prop_assert_eq!(outcome, KeyOutcome::PassThrough);
                prop_assert_eq!(dom.active(), Some(focused));
            }

            prop_assert!(modal.deactivate());
            Ok(())
        })
        .expect("property test failed");
}
