//! Message dispatch and effect execution.

mod reducer;
mod runtime;

use super::super::messages::Message;
use super::super::state::App;
use super::super::state::constants::TICK_INTERVAL;
use iced::time;
use iced::{Subscription, Task};

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> = Vec::new();

        // The housekeeping tick only runs while there is a toast to expire.
        if app.toast.is_some() {
            subscriptions.push(time::every(TICK_INTERVAL).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
