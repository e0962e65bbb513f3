use log::trace;

use super::action::SemanticAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(SemanticAction)>;

struct Subscriber {
    id: SubscriptionId,
    action: SemanticAction,
    handler: Handler,
}

/// Publish/subscribe channel keyed by semantic action.
#[derive(Default)]
pub struct ActionBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl ActionBus {
    pub fn subscribe(
        &mut self,
        action: SemanticAction,
        handler: impl FnMut(SemanticAction) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            action,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id);
        self.subscribers.len() != before
    }

    /// Invoke every subscriber of `action` in subscription order and return how
    /// many ran.
    pub fn publish(&mut self, action: SemanticAction) -> usize {
        let mut delivered = 0;
        for sub in self.subscribers.iter_mut().filter(|sub| sub.action == action) {
            (sub.handler)(action);
            delivered += 1;
        }
        trace!("bus: {action:?} delivered to {delivered} subscriber(s)");
        delivered
    }

    #[allow(dead_code)]
    pub fn has_subscribers(&self, action: SemanticAction) -> bool {
        self.subscribers.iter().any(|sub| sub.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_only_matching_actions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ActionBus::default();
        let sink = seen.clone();
        bus.subscribe(SemanticAction::Menu, move |action| {
            sink.borrow_mut().push(action)
        });

        assert_eq!(bus.publish(SemanticAction::Confirm), 0);
        assert_eq!(bus.publish(SemanticAction::Menu), 1);
        assert_eq!(*seen.borrow(), vec![SemanticAction::Menu]);
    }

    #[test]
    fn unsubscribed_handlers_stop_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = ActionBus::default();
        let sink = count.clone();
        let id = bus.subscribe(SemanticAction::Cancel, move |_| *sink.borrow_mut() += 1);

        bus.publish(SemanticAction::Cancel);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(SemanticAction::Cancel);

        assert_eq!(*count.borrow(), 1);
        assert!(!bus.has_subscribers(SemanticAction::Cancel));
    }
}
