//! In-memory vendor ranking.
//!
//! A [`VendorRanking`] is rebuilt from the vendor repository whenever a
//! listing is requested; it is never the source of truth. Both orderings are
//! stable: records that compare equal keep their insertion order. Sorting
//! returns a new `Vec` and leaves the collection's own order untouched.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The fields a ranking needs from a vendor.
pub trait Rankable {
    fn ranking_id(&self) -> &str;
    fn rating(&self) -> f64;
    fn base_price(&self) -> f64;
}

/// Minimal vendor view: identifier, rating and base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub base_price: f64,
}

impl VendorRecord {
    pub fn new(id: impl Into<String>, rating: f64, base_price: f64) -> Self {
        Self {
            id: id.into(),
            rating,
            base_price,
        }
    }
}

impl Rankable for VendorRecord {
    fn ranking_id(&self) -> &str {
        &self.id
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn base_price(&self) -> f64 {
        self.base_price
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrder {
    #[default]
    Asc,
    Desc,
}

impl PriceOrder {
    pub fn is_ascending(self) -> bool {
        matches!(self, PriceOrder::Asc)
    }
}

/// Ordered sequence of vendor records.
///
/// Duplicate identifiers are tolerated. Lookups resolve to the most recently
/// inserted match; removals take the earliest one.
#[derive(Debug, Clone)]
pub struct VendorRanking<T> {
    vendors: Vec<T>,
}

impl<T> Default for VendorRanking<T> {
    fn default() -> Self {
        Self {
            vendors: Vec::new(),
        }
    }
}

impl<T: Rankable> VendorRanking<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vendor: T) {
        self.vendors.push(vendor);
    }

    /// Removes the first record carrying `id`; absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: &str) -> Option<T> {
        let index = self.vendors.iter().position(|v| v.ranking_id() == id)?;
        Some(self.vendors.remove(index))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.vendors.iter().rev().find(|v| v.ranking_id() == id)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vendors.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.vendors
    }
}

impl<T: Rankable + Clone> VendorRanking<T> {
    /// Highest rating first.
    pub fn sorted_by_rating_descending(&self) -> Vec<T> {
        self.sorted_by(|a, b| b.rating().total_cmp(&a.rating()))
    }

    pub fn sorted_by_price(&self, ascending: bool) -> Vec<T> {
        if ascending {
            self.sorted_by(|a, b| a.base_price().total_cmp(&b.base_price()))
        } else {
            self.sorted_by(|a, b| b.base_price().total_cmp(&a.base_price()))
        }
    }

    pub fn sorted_by<F>(&self, compare: F) -> Vec<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted = self.vendors.clone();
        // slice::sort_by is stable
        sorted.sort_by(compare);
        sorted
    }
}

impl<T: Rankable> FromIterator<T> for VendorRanking<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            vendors: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for VendorRanking<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vendors.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a VendorRanking<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vendors.iter()
    }
}
