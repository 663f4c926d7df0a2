//! Album-purchase classification
//!
//! Decides, per invoice, whether the customer bought a complete album
//! (exactly the full track list of some album, no more, no fewer) or a
//! partial/individual-track selection.
//!
//! The computation is a pure, single-pass function over an immutable
//! [`PurchaseSnapshot`]. All store access lives elsewhere; the snapshot is
//! built from injected projections and validated while it is built, so
//! classification itself cannot fail.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Error, Result};

/// Invoice row identifier
pub type InvoiceId = i64;
/// Track row identifier
pub type TrackId = i64;
/// Album row identifier
pub type AlbumId = i64;

/// Per-invoice verdict: did this invoice buy a complete album?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumPurchase {
    Yes,
    No,
}

/// Classification result for a single invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceClassification {
    pub invoice_id: InvoiceId,
    /// Album owning the invoice's representative track, if any
    pub album_id: Option<AlbumId>,
    pub album_purchase: AlbumPurchase,
}

/// Aggregate counts and shares over a batch of classifications
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PurchaseBreakdown {
    pub total_invoices: u64,
    pub album_invoices: u64,
    pub track_invoices: u64,
    pub album_share: f64,
    pub track_share: f64,
}

/// Immutable purchase data: which tracks each invoice bought, and which
/// album (if any) each track belongs to.
///
/// Build order matters: register every catalog track with
/// [`insert_track`](Self::insert_track) before recording invoice lines with
/// [`insert_line`](Self::insert_line). A line referencing an unregistered
/// track is a referential-integrity error, rejected at load time.
#[derive(Debug, Clone, Default)]
pub struct PurchaseSnapshot {
    /// Purchased track set per invoice; ordered map for deterministic output
    invoice_tracks: BTreeMap<InvoiceId, BTreeSet<TrackId>>,
    /// Track to owning album; `None` for singles not tied to an album
    track_album: HashMap<TrackId, Option<AlbumId>>,
    /// Full track set per album, derived while registering tracks
    album_tracks: HashMap<AlbumId, BTreeSet<TrackId>>,
}

impl PurchaseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog track and its (optional) owning album
    pub fn insert_track(&mut self, track: TrackId, album: Option<AlbumId>) {
        self.track_album.insert(track, album);
        if let Some(album) = album {
            self.album_tracks.entry(album).or_default().insert(track);
        }
    }

    /// Record one invoice line
    ///
    /// Duplicate purchases of the same track collapse into set membership;
    /// quantity never affects classification. The referenced track must
    /// already be registered.
    pub fn insert_line(&mut self, invoice: InvoiceId, track: TrackId) -> Result<()> {
        if !self.track_album.contains_key(&track) {
            return Err(Error::ReferentialIntegrity(format!(
                "invoice {} references unknown track {}",
                invoice, track
            )));
        }
        self.invoice_tracks.entry(invoice).or_default().insert(track);
        Ok(())
    }

    /// Number of invoices in the snapshot
    pub fn invoice_count(&self) -> usize {
        self.invoice_tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoice_tracks.is_empty()
    }

    /// Classify every invoice, ordered by ascending invoice id
    ///
    /// Total: each invoice receives exactly one verdict. Deterministic for
    /// an unchanged snapshot.
    pub fn classify(&self) -> Vec<InvoiceClassification> {
        self.invoice_tracks
            .iter()
            .map(|(&invoice_id, purchased)| {
                let (album_id, album_purchase) = self.classify_one(purchased);
                InvoiceClassification {
                    invoice_id,
                    album_id,
                    album_purchase,
                }
            })
            .collect()
    }

    fn classify_one(&self, purchased: &BTreeSet<TrackId>) -> (Option<AlbumId>, AlbumPurchase) {
        // Representative track: minimum identifier among the invoice's lines.
        // For a true album purchase any line would serve; the minimum is kept
        // for parity with historical reports.
        let representative = match purchased.iter().next() {
            Some(&track) => track,
            None => return (None, AlbumPurchase::No),
        };

        let album_id = match self.track_album.get(&representative).copied().flatten() {
            Some(id) => id,
            // Representative is a single; there is no album set to compare against
            None => return (None, AlbumPurchase::No),
        };

        let album_set = match self.album_tracks.get(&album_id) {
            Some(set) => set,
            None => return (Some(album_id), AlbumPurchase::No),
        };

        // Complete-album purchase iff both one-way set differences are empty,
        // i.e. the album's track set equals the purchased set as sets.
        let album_tracks_not_bought = album_set.difference(purchased).next().is_some();
        let bought_outside_album = purchased.difference(album_set).next().is_some();

        let verdict = if album_tracks_not_bought || bought_outside_album {
            AlbumPurchase::No
        } else {
            AlbumPurchase::Yes
        };

        (Some(album_id), verdict)
    }
}

/// Reduce a batch of classifications to counts and shares
///
/// Zero invoices is a reporting edge case, not a crash: counts and shares
/// all come back as zero.
pub fn summarize(classifications: &[InvoiceClassification]) -> PurchaseBreakdown {
    let total = classifications.len() as u64;
    let album = classifications
        .iter()
        .filter(|c| c.album_purchase == AlbumPurchase::Yes)
        .count() as u64;
    let track = total - album;

    let (album_share, track_share) = if total == 0 {
        (0.0, 0.0)
    } else {
        (album as f64 / total as f64, track as f64 / total as f64)
    };

    PurchaseBreakdown {
        total_invoices: total,
        album_invoices: album,
        track_invoices: track,
        album_share,
        track_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Catalog fixture:
    /// - album 10 owns tracks {1, 2, 3}
    /// - album 20 owns tracks {4, 5}
    /// - track 6 is a single with no album
    /// - album 30 owns only track 7 (degenerate one-track album)
    fn catalog() -> PurchaseSnapshot {
        let mut snapshot = PurchaseSnapshot::new();
        snapshot.insert_track(1, Some(10));
        snapshot.insert_track(2, Some(10));
        snapshot.insert_track(3, Some(10));
        snapshot.insert_track(4, Some(20));
        snapshot.insert_track(5, Some(20));
        snapshot.insert_track(6, None);
        snapshot.insert_track(7, Some(30));
        snapshot
    }

    fn add_invoice(snapshot: &mut PurchaseSnapshot, invoice: InvoiceId, tracks: &[TrackId]) {
        for &track in tracks {
            snapshot
                .insert_line(invoice, track)
                .expect("fixture track should be registered");
        }
    }

    fn verdict_of(snapshot: &PurchaseSnapshot, invoice: InvoiceId) -> InvoiceClassification {
        snapshot
            .classify()
            .into_iter()
            .find(|c| c.invoice_id == invoice)
            .expect("invoice should be classified")
    }

    #[test]
    fn test_complete_album_purchase_in_any_order() {
        let mut snapshot = catalog();
        // Line order is irrelevant; set membership decides
        add_invoice(&mut snapshot, 100, &[3, 1, 2]);

        let c = verdict_of(&snapshot, 100);
        assert_eq!(c.album_purchase, AlbumPurchase::Yes);
        assert_eq!(c.album_id, Some(10));
    }

    #[test]
    fn test_partial_album_purchase() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 100, &[1, 2]);

        assert_eq!(verdict_of(&snapshot, 100).album_purchase, AlbumPurchase::No);
    }

    #[test]
    fn test_superset_purchase() {
        let mut snapshot = catalog();
        // Full album 10 plus one track from album 20
        add_invoice(&mut snapshot, 100, &[1, 2, 3, 4]);

        assert_eq!(verdict_of(&snapshot, 100).album_purchase, AlbumPurchase::No);
    }

    #[test]
    fn test_representative_without_album() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 100, &[6]);

        let c = verdict_of(&snapshot, 100);
        assert_eq!(c.album_purchase, AlbumPurchase::No);
        assert_eq!(c.album_id, None);
    }

    #[test]
    fn test_albumless_representative_shadows_complete_album() {
        let mut snapshot = catalog();
        // Tracks {4, 5} are all of album 20, but the representative (minimum
        // id) is an albumless single, so the invoice degenerates to "no"
        snapshot.insert_track(0, None);
        add_invoice(&mut snapshot, 100, &[0, 4, 5]);

        let c = verdict_of(&snapshot, 100);
        assert_eq!(c.album_id, None);
        assert_eq!(c.album_purchase, AlbumPurchase::No);
    }

    #[test]
    fn test_single_track_album() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 100, &[7]);

        let c = verdict_of(&snapshot, 100);
        assert_eq!(c.album_purchase, AlbumPurchase::Yes);
        assert_eq!(c.album_id, Some(30));
    }

    #[test]
    fn test_duplicate_lines_collapse_to_set_membership() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 100, &[1, 1, 2, 2, 3]);

        assert_eq!(
            verdict_of(&snapshot, 100).album_purchase,
            AlbumPurchase::Yes
        );
    }

    #[test]
    fn test_representative_is_minimum_track_id() {
        let mut snapshot = catalog();
        // Representative is track 2 (album 10); album 10 is incomplete
        add_invoice(&mut snapshot, 100, &[5, 2]);

        let c = verdict_of(&snapshot, 100);
        assert_eq!(c.album_id, Some(10));
        assert_eq!(c.album_purchase, AlbumPurchase::No);
    }

    #[test]
    fn test_unknown_track_rejected_at_load() {
        let mut snapshot = catalog();
        let err = snapshot.insert_line(100, 999).unwrap_err();

        assert!(matches!(err, Error::ReferentialIntegrity(_)));
        // The malformed line must not leave a phantom invoice behind
        assert_eq!(snapshot.invoice_count(), 0);
    }

    #[test]
    fn test_totality_and_ordering() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 300, &[1, 2, 3]);
        add_invoice(&mut snapshot, 100, &[6]);
        add_invoice(&mut snapshot, 200, &[4]);

        let classifications = snapshot.classify();
        assert_eq!(classifications.len(), snapshot.invoice_count());

        let ids: Vec<_> = classifications.iter().map(|c| c.invoice_id).collect();
        assert_eq!(ids, vec![100, 200, 300]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 100, &[1, 2, 3]);
        add_invoice(&mut snapshot, 101, &[4]);

        assert_eq!(snapshot.classify(), snapshot.classify());
    }

    #[test]
    fn test_breakdown_counts_and_shares() {
        let mut snapshot = catalog();
        add_invoice(&mut snapshot, 1, &[1, 2, 3]); // yes
        add_invoice(&mut snapshot, 2, &[4, 5]); // yes
        add_invoice(&mut snapshot, 3, &[1]); // no
        add_invoice(&mut snapshot, 4, &[6]); // no

        let breakdown = summarize(&snapshot.classify());
        assert_eq!(breakdown.total_invoices, 4);
        assert_eq!(breakdown.album_invoices, 2);
        assert_eq!(breakdown.track_invoices, 2);
        assert_eq!(
            breakdown.album_invoices + breakdown.track_invoices,
            breakdown.total_invoices
        );
        assert!((breakdown.album_share - 0.5).abs() < 1e-12);
        assert!((breakdown.album_share + breakdown.track_share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_of_empty_batch() {
        let breakdown = summarize(&[]);
        assert_eq!(breakdown.total_invoices, 0);
        assert_eq!(breakdown.album_invoices, 0);
        assert_eq!(breakdown.track_invoices, 0);
        assert_eq!(breakdown.album_share, 0.0);
        assert_eq!(breakdown.track_share, 0.0);
    }
}
