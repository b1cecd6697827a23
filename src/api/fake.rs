//! In-memory backend for controller tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use async_trait::async_trait;

use super::dto::{GoodThingsResponse, MeResponse, Product, RedeemReceipt};
use super::error::{ClientError, ClientResult};
use super::RewardsApi;
use crate::sleep::SleepSession;

#[derive(Default)]
pub struct FakeBackend {
    pub balance: Cell<f64>,
    pub products: Vec<Product>,
    pub sessions: Vec<SleepSession>,
    pub good_things: GoodThingsResponse,
    pub redeem_calls: RefCell<Vec<(i64, u32)>>,
    /// Holds the next redemption until the sender fires
    redeem_gate: RefCell<Option<tokio::sync::oneshot::Receiver<()>>>,
    failing: RefCell<HashSet<&'static str>>,
}

impl FakeBackend {
    pub fn with_balance(balance: f64) -> Self {
        Self {
            balance: Cell::new(balance),
            ..Default::default()
        }
    }

    /// Make `endpoint` answer with a server error until cleared
    pub fn fail(&self, endpoint: &'static str) {
        self.failing.borrow_mut().insert(endpoint);
    }

    pub fn recover(&self, endpoint: &'static str) {
        self.failing.borrow_mut().remove(endpoint);
    }

    /// Park the next `redeem` call; it proceeds once the returned sender fires or drops.
    pub fn hold_redeem(&self) -> tokio::sync::oneshot::Sender<()> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        *self.redeem_gate.borrow_mut() = Some(rx);
        tx
    }

    fn check(&self, endpoint: &'static str) -> ClientResult<()> {
        if self.failing.borrow().contains(endpoint) {
            return Err(ClientError::from_body(500, "Internal Server Error"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl RewardsApi for FakeBackend {
    async fn me(&self) -> ClientResult<MeResponse> {
        self.check("me")?;
        Ok(MeResponse {
            id: Some(1),
            username: Some("demo".to_string()),
            points: self.balance.get(),
        })
    }

    async fn sessions(&self) -> ClientResult<Vec<SleepSession>> {
        self.check("sessions")?;
        Ok(self.sessions.clone())
    }

    async fn good_things(&self, _others_limit: u32) -> ClientResult<GoodThingsResponse> {
        self.check("good_things")?;
        Ok(self.good_things.clone())
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.check("products")?;
        Ok(self.products.clone())
    }

    async fn redeem(&self, product_id: i64, qty: u32) -> ClientResult<RedeemReceipt> {
        let gate = self.redeem_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check("redeem")?;
        self.redeem_calls.borrow_mut().push((product_id, qty));

        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ClientError::from_body(404, r#"{"detail": "product not found"}"#))?;

        let cost = product.price * qty as f64;
        if qty == 0 || cost > self.balance.get() {
            return Err(ClientError::from_body(400, r#"{"detail": "insufficient points"}"#));
        }

        self.balance.set(self.balance.get() - cost);
        Ok(RedeemReceipt {
            order_id: Some(self.redeem_calls.borrow().len() as i64),
            remaining_points: self.balance.get(),
        })
    }
}
