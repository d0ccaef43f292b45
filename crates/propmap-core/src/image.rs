//! Deterministic property image URLs.

const PROPERTY_PHOTO_IDS: &[&str] = &[
    "photo-1600585154340-be6161a56a0c",
    "photo-1600566753190-17f0baa2a6c3",
    "photo-1600607687939-ce8a6c25118c",
    "photo-1600566752355-35792bedcfea",
    "photo-1600596542815-ffad4c1539a9",
];

/// Resolves the stock photo for a property id. No network access happens here.
#[must_use]
pub fn image_url_for(id: u32) -> String {
    let index = id as usize % PROPERTY_PHOTO_IDS.len();
    format!(
        "https://images.unsplash.com/{}?w=800&h=600&fit=crop&auto=format&q=80",
        PROPERTY_PHOTO_IDS[index]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_resolves_to_same_url() {
        assert_eq!(image_url_for(42), image_url_for(42));
    }

    #[test]
    fn ids_wrap_around_photo_list() {
        let len = u32::try_from(PROPERTY_PHOTO_IDS.len()).unwrap();
        assert_eq!(image_url_for(1), image_url_for(1 + len));
        assert!(image_url_for(0).contains(PROPERTY_PHOTO_IDS[0]));
        assert!(image_url_for(0).ends_with("q=80"));
    }
}
