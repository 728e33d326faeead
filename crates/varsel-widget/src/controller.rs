//! Async adapter between the selection machine and the storefront API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::api::{LookupData, StorefrontApi};
use crate::error::StorefrontError;
use crate::machine::{
    AddFailure, ColorChoice, CombinationInfo, Effect, Event, LookupFailure, SelectionMachine,
    WidgetOptions,
};
use crate::messages::Messages;
use crate::view::{render, WidgetView};

const CONFIRMATION_REVERT: Duration = Duration::from_secs(2);

/// Drives one widget instance: holds the session, spawns lookups and
/// add-to-cart submissions, and applies their outcomes back onto the
/// machine. A superseded lookup's late response is dropped by the machine's
/// sequence check, so rapid re-picks never show stale data.
pub struct WidgetController {
    api: StorefrontApi,
    messages: Messages,
    machine: Arc<Mutex<SelectionMachine>>,
    product_id: u64,
    session_id: String,
    nonce: String,
    revert_after: Duration,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl WidgetController {
    /// Fetches the widget bootstrap for `product_id` and builds a controller
    /// around it.
    pub async fn bootstrap(
        api: StorefrontApi,
        product_id: u64,
    ) -> Result<Self, StorefrontError> {
        let bootstrap = api.widget(product_id).await?;

        let options = WidgetOptions {
            product_id: bootstrap.product_id,
            colors: bootstrap
                .colors
                .into_iter()
                .map(|color| ColorChoice {
                    name: color.color,
                    purchasable: color.purchasable,
                    sizes: color.sizes,
                })
                .collect(),
            size_axis: bootstrap.sizes,
            has_data: bootstrap.has_data,
        };

        Ok(Self {
            api,
            messages: Messages::default(),
            machine: Arc::new(Mutex::new(SelectionMachine::new(options))),
            product_id,
            session_id: bootstrap.session_id,
            nonce: bootstrap.nonce,
            revert_after: CONFIRMATION_REVERT,
            tasks: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Overrides the delay after which an "added" confirmation reverts.
    #[must_use]
    pub fn with_confirmation_revert(mut self, delay: Duration) -> Self {
        self.revert_after = delay;
        self
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn view(&self) -> WidgetView {
        render(&self.lock_machine(), &self.messages)
    }

    pub fn pick_color(&self, color: &str) -> WidgetView {
        self.lock_machine()
            .apply(Event::ColorPicked(color.to_string()));
        self.view()
    }

    pub fn pick_size(&self, size: &str) -> WidgetView {
        let effect = self
            .lock_machine()
            .apply(Event::SizePicked(size.to_string()));
        if let Some(Effect::Lookup { seq, color, size }) = effect {
            self.spawn_lookup(seq, color, size);
        }
        self.view()
    }

    pub fn add_to_cart(&self) -> WidgetView {
        let effect = self.lock_machine().apply(Event::AddPressed);
        if let Some(Effect::SubmitAdd { color, size }) = effect {
            self.spawn_add(color, size);
        }
        self.view()
    }

    /// Waits for every spawned lookup and add task to finish, including the
    /// confirmation revert delay.
    pub async fn settle(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            tasks.drain(..).collect()
        };
        for handle in handles {
            if let Err(error) = handle.await {
                tracing::error!(error = %error, "widget task failed");
            }
        }
    }

    fn lock_machine(&self) -> MutexGuard<'_, SelectionMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_lookup(&self, seq: u64, color: String, size: String) {
        let api = self.api.clone();
        let machine = Arc::clone(&self.machine);
        let session_id = self.session_id.clone();
        let nonce = self.nonce.clone();
        let product_id = self.product_id;

        let handle = tokio::spawn(async move {
            let event = match api
                .lookup(&session_id, &nonce, product_id, &color, &size)
                .await
            {
                Ok(data) => Event::LookupResolved {
                    seq,
                    info: combination_info(data),
                },
                Err(StorefrontError::Http(error)) => {
                    tracing::warn!(error = %error, color, size, "variation lookup did not complete");
                    Event::LookupFailed {
                        seq,
                        failure: LookupFailure::Connection,
                    }
                }
                Err(error) => {
                    tracing::warn!(error = %error, color, size, "variation lookup rejected");
                    Event::LookupFailed {
                        seq,
                        failure: LookupFailure::Data,
                    }
                }
            };
            machine
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .apply(event);
        });
        self.push_task(handle);
    }

    fn spawn_add(&self, color: String, size: String) {
        let api = self.api.clone();
        let machine = Arc::clone(&self.machine);
        let session_id = self.session_id.clone();
        let nonce = self.nonce.clone();
        let product_id = self.product_id;
        let revert_after = self.revert_after;

        let handle = tokio::spawn(async move {
            // The shop grid always adds a single unit.
            let outcome = api
                .add_to_cart(&session_id, &nonce, product_id, &color, &size, 1)
                .await;

            match outcome {
                Ok(data) => {
                    let effect = machine
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .apply(Event::AddSucceeded {
                            cart_count: data.cart_count,
                            cart_total: data.cart_total,
                        });
                    if effect == Some(Effect::RevertLater) {
                        tokio::time::sleep(revert_after).await;
                        machine
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .apply(Event::ConfirmationElapsed);
                    }
                }
                Err(StorefrontError::Rejected { code, message }) => {
                    tracing::warn!(code, color, size, "add to cart rejected");
                    machine
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .apply(Event::AddFailed(AddFailure::Rejected(message)));
                }
                Err(error) => {
                    tracing::warn!(error = %error, color, size, "add to cart did not complete");
                    machine
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .apply(Event::AddFailed(AddFailure::Connection));
                }
            }
        });
        self.push_task(handle);
    }

    fn push_task(&self, handle: JoinHandle<()>) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}

fn combination_info(data: LookupData) -> CombinationInfo {
    CombinationInfo {
        price: data.price,
        raw_price: data.raw_price,
        stock: data.stock,
        image: data.image,
        available: data.available,
        is_valid: data.is_valid,
        combination_key: data.combination_key,
    }
}
