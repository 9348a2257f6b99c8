mod offer;

pub use offer::DeletedOffers;
