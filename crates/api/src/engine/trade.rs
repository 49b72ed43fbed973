//! Marketplace trade engine.
//!
//! One method per marketplace operation; each runs as a single database
//! transaction. Validations raise typed errors before any write, ledger
//! mutations go through the atomic primitives in `pitchside_db`, and any
//! failure is reported to the audit sink together with the intended-write
//! flags captured up to that point.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use pitchside_core::audit::{operations, AuditSink, ErrorKind, FailedOperation};
use pitchside_core::error::{CoreError, Precondition};
use pitchside_core::market;
use pitchside_core::packs::{self, PlayerPool, POOL_SAMPLE_SIZE};
use pitchside_core::types::DbId;
use pitchside_db::models::card::Card;
use pitchside_db::models::listing::Listing;
use pitchside_db::models::status::ListingStatus;
use pitchside_db::repositories::{AccountRepo, CardRepo, ListingRepo, PackRepo};
use pitchside_db::DbPool;

use crate::engine::guard::IdempotencyGuard;
use crate::error::AppError;

// ---------------------------------------------------------------------------
// Intended-write flags
// ---------------------------------------------------------------------------

/// Flags describing which writes an operation intended before its
/// transaction aborted. The store commits all-or-nothing, so these are
/// forensics for the audit trail, not persisted partial state.
mod intent {
    use serde::Serialize;

    #[derive(Debug, Default, Serialize)]
    pub struct ListCard {
        pub card_locked: bool,
        pub listing_created: bool,
    }

    #[derive(Debug, Default, Serialize)]
    pub struct BuyListing {
        pub buyer_debited: bool,
        pub seller_credited: bool,
        pub listing_closed: bool,
        pub card_transferred: bool,
    }

    #[derive(Debug, Default, Serialize)]
    pub struct CancelListing {
        pub card_unlocked: bool,
        pub listing_cancelled: bool,
    }

    #[derive(Debug, Default, Serialize)]
    pub struct BuyPack {
        pub buyer_debited: bool,
        pub stock_decremented: bool,
        pub cards_minted: u32,
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Result of a successful pack purchase.
#[derive(Debug, Serialize)]
pub struct PackPurchase {
    pub pack_id: DbId,
    pub cards: Vec<Card>,
}

// ---------------------------------------------------------------------------
// TradeEngine
// ---------------------------------------------------------------------------

/// Executes the four marketplace operations against the store.
pub struct TradeEngine {
    pool: DbPool,
    player_pool: Arc<dyn PlayerPool>,
    audit: Arc<dyn AuditSink>,
    guard: IdempotencyGuard,
}

impl TradeEngine {
    pub fn new(pool: DbPool, player_pool: Arc<dyn PlayerPool>, audit: Arc<dyn AuditSink>) -> Self {
        let guard = IdempotencyGuard::new(pool.clone());
        Self {
            pool,
            player_pool,
            audit,
            guard,
        }
    }

    // -- list_card ----------------------------------------------------------

    /// List a card for sale at a fixed price.
    ///
    /// The card must exist under the seller and be unlocked. Locks the
    /// card for the listing's lifetime and fixes the tax-adjusted seller
    /// payout at listing time.
    pub async fn list_card(
        &self,
        seller_id: DbId,
        card_id: DbId,
        price: i64,
    ) -> Result<Listing, AppError> {
        let mut flags = intent::ListCard::default();
        match self.list_card_tx(seller_id, card_id, price, &mut flags).await {
            Ok(listing) => {
                tracing::info!(
                    listing_id = listing.id,
                    card_id,
                    seller_id,
                    price,
                    net_seller = listing.net_seller,
                    "Card listed",
                );
                Ok(listing)
            }
            Err(err) => {
                self.report(operations::LIST_CARD, seller_id, card_id, &err, &flags)
                    .await;
                Err(err)
            }
        }
    }

    async fn list_card_tx(
        &self,
        seller_id: DbId,
        card_id: DbId,
        price: i64,
        flags: &mut intent::ListCard,
    ) -> Result<Listing, AppError> {
        market::validate_price(price)?;
        let net_seller = market::net_seller(price);

        let mut tx = self.pool.begin().await?;

        let seller = AccountRepo::find_by_id_tx(&mut tx, seller_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Account",
                id: seller_id,
            })?;

        // A card owned by someone else reads as absent from the seller's
        // inventory.
        let card = CardRepo::find_owned_for_update(&mut tx, card_id, seller_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Card",
                id: card_id,
            })?;

        if card.is_locked {
            return Err(CoreError::PreconditionFailed(Precondition::CardLocked).into());
        }

        flags.card_locked = true;
        CardRepo::lock(&mut tx, card_id).await?;

        let card_snapshot = serde_json::json!({
            "card_id": card.id,
            "player_id": card.player_id,
            "player_name": card.player_name,
            "position": card.position,
            "scarcity": card.scarcity,
        });

        flags.listing_created = true;
        let listing = ListingRepo::create(
            &mut tx,
            card_id,
            seller_id,
            &seller.display_name,
            price,
            net_seller,
            &card_snapshot,
        )
        .await?;

        tx.commit().await?;
        Ok(listing)
    }

    // -- buy_listing --------------------------------------------------------

    /// Buy an active listing.
    ///
    /// In one transaction: debit the buyer, credit the seller the payout
    /// fixed at listing time, close the listing, and transfer the card to
    /// the buyer unlocked.
    pub async fn buy_listing(&self, buyer_id: DbId, listing_id: DbId) -> Result<Listing, AppError> {
        let mut flags = intent::BuyListing::default();
        match self.buy_listing_tx(buyer_id, listing_id, &mut flags).await {
            Ok(listing) => {
                // The trade is committed; a failed cleanup must not turn
                // success into an error.
                if let Err(err) = self
                    .guard
                    .clear(buyer_id, operations::BUY_LISTING, listing_id)
                    .await
                {
                    tracing::warn!(error = %err, "Failed to clear idempotency record");
                }
                tracing::info!(
                    listing_id,
                    buyer_id,
                    seller_id = listing.seller_id,
                    price = listing.price,
                    "Listing sold",
                );
                Ok(listing)
            }
            Err(err) => {
                self.report(operations::BUY_LISTING, buyer_id, listing_id, &err, &flags)
                    .await;
                Err(err)
            }
        }
    }

    async fn buy_listing_tx(
        &self,
        buyer_id: DbId,
        listing_id: DbId,
        flags: &mut intent::BuyListing,
    ) -> Result<Listing, AppError> {
        self.guard
            .admit(buyer_id, operations::BUY_LISTING, listing_id)
            .await?;

        let mut tx = self.pool.begin().await?;

        let listing = ListingRepo::find_for_update(&mut tx, listing_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Listing",
                id: listing_id,
            })?;

        if listing.status != ListingStatus::Active.as_str() {
            return Err(CoreError::PreconditionFailed(Precondition::ListingNotActive).into());
        }
        if listing.seller_id == buyer_id {
            return Err(CoreError::PreconditionFailed(Precondition::SelfPurchase).into());
        }

        flags.buyer_debited = true;
        if !AccountRepo::debit_coins(&mut tx, buyer_id, listing.price).await? {
            return Err(CoreError::PreconditionFailed(Precondition::InsufficientBalance).into());
        }

        // The payout was fixed at listing time; never recomputed here.
        flags.seller_credited = true;
        AccountRepo::credit_coins(&mut tx, listing.seller_id, listing.net_seller).await?;

        flags.listing_closed = true;
        let sold = ListingRepo::mark_sold(&mut tx, listing_id, buyer_id, Utc::now()).await?;

        flags.card_transferred = true;
        CardRepo::transfer(&mut tx, listing.card_id, buyer_id).await?;

        tx.commit().await?;
        Ok(sold)
    }

    // -- cancel_listing -----------------------------------------------------

    /// Cancel an active listing, unlocking its card.
    ///
    /// Only the listing's seller may cancel; cancelling a non-active
    /// listing fails and changes nothing.
    pub async fn cancel_listing(
        &self,
        caller_id: DbId,
        listing_id: DbId,
    ) -> Result<Listing, AppError> {
        let mut flags = intent::CancelListing::default();
        match self.cancel_listing_tx(caller_id, listing_id, &mut flags).await {
            Ok(listing) => {
                tracing::info!(listing_id, seller_id = caller_id, "Listing cancelled");
                Ok(listing)
            }
            Err(err) => {
                self.report(
                    operations::CANCEL_LISTING,
                    caller_id,
                    listing_id,
                    &err,
                    &flags,
                )
                .await;
                Err(err)
            }
        }
    }

    async fn cancel_listing_tx(
        &self,
        caller_id: DbId,
        listing_id: DbId,
        flags: &mut intent::CancelListing,
    ) -> Result<Listing, AppError> {
        let mut tx = self.pool.begin().await?;

        let listing = ListingRepo::find_for_update(&mut tx, listing_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Listing",
                id: listing_id,
            })?;

        if listing.seller_id != caller_id {
            return Err(
                CoreError::PermissionDenied("Only the seller can cancel a listing".into()).into(),
            );
        }
        if listing.status != ListingStatus::Active.as_str() {
            return Err(CoreError::PreconditionFailed(Precondition::ListingNotActive).into());
        }

        flags.card_unlocked = true;
        CardRepo::unlock(&mut tx, listing.card_id).await?;

        flags.listing_cancelled = true;
        let cancelled = ListingRepo::mark_cancelled(&mut tx, listing_id).await?;

        tx.commit().await?;
        Ok(cancelled)
    }

    // -- buy_pack -----------------------------------------------------------

    /// Buy a primary-market pack.
    ///
    /// In one transaction: debit the buyer, take one unit of stock, and
    /// mint one card per contents entry, drawn uniformly with replacement
    /// from the player pool's bounded sample.
    pub async fn buy_pack(&self, buyer_id: DbId, pack_id: DbId) -> Result<PackPurchase, AppError> {
        let mut flags = intent::BuyPack::default();
        match self.buy_pack_tx(buyer_id, pack_id, &mut flags).await {
            Ok(purchase) => {
                if let Err(err) = self
                    .guard
                    .clear(buyer_id, operations::BUY_PACK, pack_id)
                    .await
                {
                    tracing::warn!(error = %err, "Failed to clear idempotency record");
                }
                tracing::info!(
                    pack_id,
                    buyer_id,
                    cards = purchase.cards.len(),
                    "Pack purchased",
                );
                Ok(purchase)
            }
            Err(err) => {
                self.report(operations::BUY_PACK, buyer_id, pack_id, &err, &flags)
                    .await;
                Err(err)
            }
        }
    }

    async fn buy_pack_tx(
        &self,
        buyer_id: DbId,
        pack_id: DbId,
        flags: &mut intent::BuyPack,
    ) -> Result<PackPurchase, AppError> {
        self.guard
            .admit(buyer_id, operations::BUY_PACK, pack_id)
            .await?;

        let mut tx = self.pool.begin().await?;

        let pack = PackRepo::find_for_update(&mut tx, pack_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Pack",
                id: pack_id,
            })?;

        if pack.stock <= 0 {
            return Err(CoreError::PreconditionFailed(Precondition::OutOfStock).into());
        }

        let contents = pack.slots().map_err(|e| {
            CoreError::Internal(format!("pack {} has malformed contents: {e}", pack.id))
        })?;

        flags.buyer_debited = true;
        if !AccountRepo::debit_coins(&mut tx, buyer_id, pack.price).await? {
            return Err(CoreError::PreconditionFailed(Precondition::InsufficientBalance).into());
        }

        flags.stock_decremented = true;
        if !PackRepo::decrement_stock(&mut tx, pack_id).await? {
            return Err(CoreError::PreconditionFailed(Precondition::OutOfStock).into());
        }

        let sample = self.player_pool.sample(POOL_SAMPLE_SIZE).await?;
        let drawn = packs::draw_with_replacement(&mut rand::thread_rng(), &sample, &contents)?;

        flags.cards_minted = drawn.len() as u32;
        let mut cards = Vec::with_capacity(drawn.len());
        for card in &drawn {
            cards.push(CardRepo::mint(&mut tx, buyer_id, card).await?);
        }

        tx.commit().await?;
        Ok(PackPurchase { pack_id, cards })
    }

    // -- Failure reporting --------------------------------------------------

    /// Record a rolled-back operation with its intended-write flags.
    ///
    /// Sink failures are logged but never mask the original error.
    async fn report<F: Serialize>(
        &self,
        operation: &'static str,
        user_id: DbId,
        target_id: DbId,
        err: &AppError,
        flags: &F,
    ) {
        let kind = match err {
            AppError::Core(core) => ErrorKind::from(core),
            AppError::Database(_) => ErrorKind::Internal,
        };

        let failure = FailedOperation {
            operation,
            user_id: Some(user_id),
            target_id: Some(target_id),
            kind,
            message: err.to_string(),
            partial_state: serde_json::to_value(flags).unwrap_or(serde_json::Value::Null),
        };

        if let Err(sink_err) = self.audit.record_failure(failure).await {
            tracing::error!(error = %sink_err, "Audit sink rejected a failure record");
        }
    }
}
