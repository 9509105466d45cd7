//! Payment vendor selection policies.
//!
//! Each toll event asks the active [`VendorSelection`] which of the paying
//! vehicle's allowed vendors to charge through.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub trait VendorSelection: Send + Sync {
    /// Picks one of `vendors`, or `None` when the list is empty.
    fn select<'a>(&mut self, vendors: &'a [String]) -> Option<&'a str>;
}

/// Uniformly random choice.
pub struct UniformVendorSelection {
    rng: StdRng,
}

impl UniformVendorSelection {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl VendorSelection for UniformVendorSelection {
    fn select<'a>(&mut self, vendors: &'a [String]) -> Option<&'a str> {
        vendors.choose(&mut self.rng).map(String::as_str)
    }
}

/// Cycles through the list with a single counter shared by all callers.
#[derive(Debug, Default)]
pub struct RoundRobinVendorSelection {
    next: usize,
}

impl VendorSelection for RoundRobinVendorSelection {
    fn select<'a>(&mut self, vendors: &'a [String]) -> Option<&'a str> {
        if vendors.is_empty() {
            return None;
        }
        let vendor = &vendors[self.next % vendors.len()];
        self.next = self.next.wrapping_add(1);
        Some(vendor.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorPolicyKind {
    #[default]
    UniformRandom,
    RoundRobin,
}

#[derive(Resource)]
pub struct VendorSelectionResource(pub Box<dyn VendorSelection>);

impl VendorSelectionResource {
    pub fn from_kind(kind: VendorPolicyKind, seed: Option<u64>) -> Self {
        match kind {
            VendorPolicyKind::UniformRandom => Self(Box::new(UniformVendorSelection::new(seed))),
            VendorPolicyKind::RoundRobin => Self(Box::new(RoundRobinVendorSelection::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendors() -> Vec<String> {
        ["Vendor_A", "Vendor_B", "Vendor_C"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn uniform_picks_from_list_and_is_seeded() {
        let list = vendors();
        let mut a = UniformVendorSelection::new(Some(9));
        let mut b = UniformVendorSelection::new(Some(9));
        for _ in 0..30 {
            let x = a.select(&list).expect("vendor");
            assert!(list.iter().any(|v| v == x));
            assert_eq!(Some(x), b.select(&list));
        }
    }

    #[test]
    fn round_robin_cycles() {
        let list = vendors();
        let mut policy = RoundRobinVendorSelection::default();
        let picks: Vec<_> = (0..4).filter_map(|_| policy.select(&list)).collect();
        assert_eq!(picks, vec!["Vendor_A", "Vendor_B", "Vendor_C", "Vendor_A"]);
    }

    #[test]
    fn empty_list_yields_none() {
        let mut policy = VendorSelectionResource::from_kind(VendorPolicyKind::UniformRandom, Some(1));
        assert_eq!(policy.0.select(&[]), None);
    }
}
