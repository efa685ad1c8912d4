//! Literal records served by the test endpoints. They never touch the feed.

use super::types::ProgressRecord;

const SUNRISE_COVER: &str = "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1729090282l/214333691._SX180_.jpg";
const KING_LEOPOLD_COVER: &str = "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1328315558i/10474352._SX180_.jpg";
const SWIMMING_COVER: &str = "https://i.gr-assets.com/images/S/compressed.photo.goodreads.com/books/1610434755l/54496088._SX180_.jpg";

pub fn three_items() -> Vec<ProgressRecord> {
    vec![
        ProgressRecord::new("Sunrise on the Reaping", 61, SUNRISE_COVER),
        ProgressRecord::new("King Leopold's Ghost", 55, KING_LEOPOLD_COVER),
        ProgressRecord::new("Swimming in the Dark", 38, SWIMMING_COVER),
    ]
}

pub fn two_items() -> Vec<ProgressRecord> {
    vec![
        ProgressRecord::new("King Leopold's Ghost", 55, KING_LEOPOLD_COVER),
        ProgressRecord::new("Swimming in the Dark", 38, SWIMMING_COVER),
    ]
}
