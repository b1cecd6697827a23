//! Storefront Controller
//!
//! Product selection, quantity bounds and redemption. The balance shown is
//! only ever the one the backend reported; a failed redemption changes
//! nothing.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::api::{ClientError, ClientResult, Product, RewardsApi};
use crate::overlay::{OverlayController, OverlayId, OverlayMedia, OverlaySurface};
use crate::redemption::{max_quantity, quantity_hint, QuantityPolicy};

/// Storefront errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    #[error("No product selected")]
    NoSelection,

    #[error("Choose a quantity of at least 1")]
    InvalidQuantity,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// The product open in the redeem dialog
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub product: Product,
    pub max_quantity: u32,
    /// Slider value in `0..=max_quantity`
    pub quantity: u32,
    pub hint: String,
}

impl Selection {
    fn new(product: Product, balance: f64) -> Self {
        let max = max_quantity(&product, balance);
        Self {
            max_quantity: max,
            quantity: 0,
            hint: quantity_hint(&product, max),
            product,
        }
    }

    /// Recompute the bounds against a new balance, clamping the chosen quantity.
    fn rebound(&mut self, balance: f64) {
        self.max_quantity = max_quantity(&self.product, balance);
        self.quantity = self.quantity.min(self.max_quantity);
        self.hint = quantity_hint(&self.product, self.max_quantity);
    }

    pub fn can_redeem(&self) -> bool {
        self.quantity > 0
    }

    /// Points the current quantity costs
    pub fn cost(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorefrontState {
    pub balance: Option<f64>,
    pub products: Vec<Product>,
    pub selection: Option<Selection>,
}

/// How a successful redemption is acknowledged
#[derive(Clone, Debug, PartialEq)]
pub enum Celebration {
    /// The overlay video was opened
    Video(OverlayId),
    /// Text notice for the user
    Notice(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseOutcome {
    pub remaining_points: f64,
    pub celebration: Celebration,
}

pub struct StorefrontController<B: RewardsApi, S: OverlaySurface> {
    backend: B,
    overlay: Rc<RefCell<OverlayController<S>>>,
    celebration: OverlayMedia,
    state: RefCell<StorefrontState>,
}

impl<B: RewardsApi, S: OverlaySurface> StorefrontController<B, S> {
    pub fn new(
        backend: B,
        overlay: Rc<RefCell<OverlayController<S>>>,
        celebration: OverlayMedia,
    ) -> Self {
        Self {
            backend,
            overlay,
            celebration,
            state: RefCell::new(StorefrontState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> StorefrontState {
        self.state.borrow().clone()
    }

    /// Fetch the balance, then the catalog.
    pub async fn load(&self) -> ClientResult<()> {
        let me = self.backend.me().await?;
        self.state.borrow_mut().balance = Some(me.points);

        let products = self.backend.products().await?;
        tracing::info!(count = products.len(), balance = me.points, "Catalog loaded");
        self.state.borrow_mut().products = products;
        Ok(())
    }

    /// Open the redeem dialog for a product; `None` if it is not in the catalog.
    pub fn select(&self, product_id: i64) -> Option<Selection> {
        let mut state = self.state.borrow_mut();
        let product = state.products.iter().find(|p| p.id == product_id)?.clone();
        let selection = Selection::new(product, state.balance.unwrap_or(0.0));

        tracing::debug!(
            product = %selection.product.name,
            max = selection.max_quantity,
            "Product selected"
        );
        state.selection = Some(selection.clone());
        Some(selection)
    }

    /// Set the slider value, clamped to the current bounds. Returns the stored value.
    pub fn set_quantity(&self, quantity: u32) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        let selection = state.selection.as_mut()?;
        selection.quantity = quantity.min(selection.max_quantity);
        Some(selection.quantity)
    }

    pub fn close_selection(&self) {
        self.state.borrow_mut().selection = None;
    }

    /// Redeem the selected quantity.
    ///
    /// On success the balance becomes the backend's remaining points and the
    /// open selection's bounds are recomputed against it. The quantity resets
    /// to zero only if the redeemed product is still the one selected.
    pub async fn purchase(&self) -> Result<PurchaseOutcome, StorefrontError> {
        let (product, quantity) = {
            let state = self.state.borrow();
            let selection = state.selection.as_ref().ok_or(StorefrontError::NoSelection)?;
            (selection.product.clone(), selection.quantity)
        };
        if quantity == 0 {
            return Err(StorefrontError::InvalidQuantity);
        }

        let receipt = self.backend.redeem(product.id, quantity).await?;
        let remaining = receipt.remaining_points;
        tracing::info!(
            product = %product.name,
            quantity,
            remaining,
            order_id = ?receipt.order_id,
            "Redeemed"
        );

        {
            let mut state = self.state.borrow_mut();
            state.balance = Some(remaining);
            match state.selection.as_mut() {
                Some(selection) if selection.product.id == product.id => {
                    *selection = Selection::new(product.clone(), remaining);
                }
                Some(selection) => selection.rebound(remaining),
                None => {}
            }
        }

        let celebration = if QuantityPolicy::for_product(&product).plays_celebration() {
            let id = self.overlay.borrow_mut().open(self.celebration.clone());
            Celebration::Video(id)
        } else {
            Celebration::Notice(format!("Redeemed! Remaining: {:.1} pts", remaining))
        };

        Ok(PurchaseOutcome {
            remaining_points: remaining,
            celebration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::overlay::fake::FakeSurface;
    use crate::overlay::OverlayState;
    use crate::redemption::{DONATION_PRODUCT, SINGLE_PLAY_PRODUCT};

    fn product(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            description: None,
            image: None,
        }
    }

    type TestStorefront = StorefrontController<FakeBackend, FakeSurface>;

    fn storefront(balance: f64) -> TestStorefront {
        let mut backend = FakeBackend::with_balance(balance);
        backend.products = vec![
            product(1, DONATION_PRODUCT, 10.0),
            product(2, SINGLE_PLAY_PRODUCT, 300.0),
            product(3, "Eco Notebook", 10.0),
        ];
        let overlay = Rc::new(RefCell::new(OverlayController::new(FakeSurface::default())));
        StorefrontController::new(
            backend,
            overlay,
            OverlayMedia::new("assets/gacha.mp4", Some("assets/gacha.jpg")),
        )
    }

    #[tokio::test]
    async fn test_load_and_select() {
        let store = storefront(1520.0);
        store.load().await.unwrap();

        let selection = store.select(1).unwrap();
        assert_eq!(selection.max_quantity, 152);
        assert_eq!(selection.quantity, 0);
        assert!(!selection.can_redeem());
        assert_eq!(
            selection.hint,
            "You can redeem up to 152. (No 100-piece cap for donations.)"
        );

        assert_eq!(store.select(3).unwrap().max_quantity, 100);
        assert!(store.select(99).is_none());
    }

    #[tokio::test]
    async fn test_load_stops_when_balance_fails() {
        let store = storefront(100.0);
        store.backend().fail("me");

        assert!(store.load().await.is_err());
        let state = store.snapshot();
        assert_eq!(state.balance, None);
        assert!(state.products.is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_clamps() {
        let store = storefront(50.0);
        store.load().await.unwrap();
        assert_eq!(store.set_quantity(3), None);

        store.select(3);
        assert_eq!(store.set_quantity(500), Some(5));
        assert_eq!(store.set_quantity(2), Some(2));
    }

    #[tokio::test]
    async fn test_purchase_updates_balance_and_bounds() {
        let store = storefront(1520.0);
        store.load().await.unwrap();
        store.select(1);
        store.set_quantity(100);

        let outcome = store.purchase().await.unwrap();
        assert_eq!(outcome.remaining_points, 520.0);
        assert_eq!(
            outcome.celebration,
            Celebration::Notice("Redeemed! Remaining: 520.0 pts".to_string())
        );

        let state = store.snapshot();
        assert_eq!(state.balance, Some(520.0));
        let selection = state.selection.unwrap();
        assert_eq!(selection.max_quantity, 52);
        assert_eq!(selection.quantity, 0);
        assert_eq!(store.backend().redeem_calls.borrow().as_slice(), &[(1, 100)]);
    }

    #[tokio::test]
    async fn test_failed_purchase_changes_nothing() {
        let store = storefront(1520.0);
        store.load().await.unwrap();
        store.select(3);
        store.set_quantity(4);
        store.backend().fail("redeem");

        let before = store.snapshot();
        let err = store.purchase().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Client(ClientError::Status { status: 500, .. })));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_rejected_purchase_keeps_balance() {
        let store = storefront(1520.0);
        store.load().await.unwrap();
        store.select(3);
        store.set_quantity(10);

        // Someone else spent the points in the meantime
        store.backend().balance.set(50.0);
        let err = store.purchase().await.unwrap_err();

        assert_eq!(err.to_string(), "insufficient points");
        assert_eq!(store.snapshot().balance, Some(1520.0));
    }

    #[tokio::test]
    async fn test_single_play_opens_overlay() {
        let store = storefront(700.0);
        store.load().await.unwrap();
        store.select(2);
        assert_eq!(store.set_quantity(5), Some(1));

        let outcome = store.purchase().await.unwrap();
        let Celebration::Video(id) = outcome.celebration else {
            panic!("expected the overlay video");
        };

        let overlay = store.overlay.borrow();
        assert_eq!(overlay.state().current(), Some(id));
        assert_eq!(overlay.surface().sources, vec!["assets/gacha.mp4".to_string()]);
        assert_eq!(store.snapshot().selection.unwrap().max_quantity, 1);
    }

    #[tokio::test]
    async fn test_repeated_single_play_keeps_one_overlay() {
        let store = storefront(700.0);
        store.load().await.unwrap();
        store.select(2);

        store.set_quantity(1);
        store.purchase().await.unwrap();
        store.set_quantity(1);
        store.purchase().await.unwrap();

        let overlay = store.overlay.borrow();
        assert_eq!(overlay.surface().mounted.len(), 1);
        assert!(matches!(overlay.state(), OverlayState::Opening { .. }));
        assert_eq!(store.snapshot().selection.unwrap().max_quantity, 0);
    }

    #[tokio::test]
    async fn test_switching_product_during_purchase_keeps_quantity() {
        let store = storefront(1520.0);
        store.load().await.unwrap();
        store.select(3);
        store.set_quantity(4);
        let release = store.backend().hold_redeem();

        let switch = async {
            store.select(1);
            assert_eq!(store.set_quantity(7), Some(7));
            let _ = release.send(());
        };
        let (outcome, _) = tokio::join!(store.purchase(), switch);

        assert_eq!(outcome.unwrap().remaining_points, 1480.0);
        let selection = store.snapshot().selection.unwrap();
        assert_eq!(selection.product.id, 1);
        assert_eq!(selection.quantity, 7);
        assert_eq!(selection.max_quantity, 148);
        assert_eq!(store.backend().redeem_calls.borrow().as_slice(), &[(3, 4)]);
    }

    #[tokio::test]
    async fn test_purchase_clamps_other_selection_to_new_balance() {
        let store = storefront(100.0);
        store.load().await.unwrap();
        store.select(3);
        store.set_quantity(6);
        let release = store.backend().hold_redeem();

        let switch = async {
            store.select(1);
            store.set_quantity(10);
            let _ = release.send(());
        };
        let (outcome, _) = tokio::join!(store.purchase(), switch);

        assert_eq!(outcome.unwrap().remaining_points, 40.0);
        let selection = store.snapshot().selection.unwrap();
        assert_eq!(selection.max_quantity, 4);
        assert_eq!(selection.quantity, 4);
        assert_eq!(
            selection.hint,
            "You can redeem up to 4. (No 100-piece cap for donations.)"
        );
    }

    #[tokio::test]
    async fn test_purchase_requires_quantity() {
        let store = storefront(100.0);
        store.load().await.unwrap();
        assert_eq!(store.purchase().await, Err(StorefrontError::NoSelection));

        store.select(3);
        assert_eq!(store.purchase().await, Err(StorefrontError::InvalidQuantity));
        assert!(store.backend().redeem_calls.borrow().is_empty());

        store.close_selection();
        assert_eq!(store.snapshot().selection, None);
    }
}
