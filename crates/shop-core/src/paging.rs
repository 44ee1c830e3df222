//! Client-side filtering and pagination.
//!
//! The back-office order console narrows an already-fetched page without
//! another round-trip. The helpers here mirror the server's
//! `{ page, pages, total }` meta so the rendering code treats local and
//! remote pages identically.

use shop_types::{Order, OrderStatus, PageMeta, Paginated};

/// Local filter over a list of orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
	/// Keep only orders in this status.
	pub status: Option<OrderStatus>,
	/// Case-insensitive needle matched against the order id and the
	/// contact name.
	pub search: Option<String>,
}

impl OrderFilter {
	/// Returns true if the order passes the filter.
	pub fn matches(&self, order: &Order) -> bool {
		if let Some(status) = self.status {
			if order.status != status {
				return false;
			}
		}
		if let Some(needle) = &self.search {
			let needle = needle.to_lowercase();
			let in_id = order.id.to_lowercase().contains(&needle);
			let in_name = order.contact_info.name.to_lowercase().contains(&needle);
			if !in_id && !in_name {
				return false;
			}
		}
		true
	}

	/// Applies the filter, preserving order.
	pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
		orders.iter().filter(|o| self.matches(o)).collect()
	}
}

/// Slices a list into a page with server-style meta.
///
/// `page` is 1-based and clamped into range; `per_page` is treated as at
/// least 1. An empty list yields one empty page.
pub fn paginate<T: Clone>(items: &[T], page: u64, per_page: u64) -> Paginated<T> {
	let per_page = per_page.max(1);
	let total = items.len() as u64;
	let pages = total.div_ceil(per_page).max(1);
	let page = page.clamp(1, pages);

	let start = ((page - 1) * per_page) as usize;
	let end = (start + per_page as usize).min(items.len());
	let data = items[start..end].to_vec();

	Paginated {
		data,
		meta: PageMeta { page, pages, total },
	}
}
