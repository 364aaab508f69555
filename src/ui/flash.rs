use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::app::controllers::notifications::{FlashDismisser, FlashId, FlashTiming};
use crate::app::infrastructure::dom::{Dom, Scheduler};

/// Collects the banners present now and schedules their dismissal.
/// Banners added later are never picked up. Returns `None` when there is
/// nothing to dismiss; no timer is scheduled in that case.
pub fn schedule_flash_dismissal<D: Dom, S: Scheduler>(
    dom: &D,
    scheduler: &S,
    selector: &str,
    timing: FlashTiming,
) -> Option<Rc<RefCell<FlashDismisser>>> {
    let banners = dom.query_all(selector);
    let dismisser = Rc::new(RefCell::new(FlashDismisser::new(banners.len(), timing)));
    if !dismisser.borrow().is_armed() {
        return None;
    }
    debug!("{} flash banner(s) will fade in {:?}", banners.len(), timing.delay);

    let (dom_c, sched, state) = (dom.clone(), scheduler.clone(), dismisser.clone());
    scheduler.schedule(
        timing.delay,
        Box::new(move || {
            let fading = state.borrow_mut().begin_fade();
            let transition = timing.transition_css();
            for id in fading {
                let FlashId(index) = id;
                let banner = banners[index].clone();
                dom_c.set_style(&banner, "transition", &transition);
                dom_c.set_style(&banner, "opacity", "0");

                let (dom_c, state) = (dom_c.clone(), state.clone());
                sched.schedule(
                    timing.fade,
                    Box::new(move || {
                        if state.borrow_mut().remove(id) {
                            dom_c.set_style(&banner, "display", "none");
                        }
                    }),
                );
            }
        }),
    );

    Some(dismisser)
}
