use wedding_market::{Rankable, VendorRanking, VendorRecord};

fn ids<T: Rankable>(records: &[T]) -> Vec<&str> {
    records.iter().map(|r| r.ranking_id()).collect()
}

fn sample() -> VendorRanking<VendorRecord> {
    [
        VendorRecord::new("A", 3.0, 100.0),
        VendorRecord::new("B", 5.0, 50.0),
        VendorRecord::new("C", 5.0, 200.0),
    ]
    .into_iter()
    .collect()
}

/// 插入 A、B、C 後的排序結果
#[test]
fn test_reference_scenario() {
    let ranking = sample();

    let by_rating = ranking.sorted_by_rating_descending();
    assert_eq!(ids(&by_rating), vec!["B", "C", "A"]);

    let by_price = ranking.sorted_by_price(true);
    assert_eq!(ids(&by_price), vec!["B", "A", "C"]);

    // 排序不改變原本的順序
    assert_eq!(ranking.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_orderings_are_monotonic_and_stable() {
    let prices = [30.0, 10.0, 30.0, 20.0, 10.0, 30.0, 50.0];
    let ratings = [4.0, 4.5, 4.0, 2.0, 4.5, 3.0, 4.0];
    let ranking: VendorRanking<VendorRecord> = prices
        .iter()
        .zip(ratings)
        .enumerate()
        .map(|(i, (&price, rating))| VendorRecord::new(format!("v{}", i), rating, price))
        .collect();

    let by_rating = ranking.sorted_by_rating_descending();
    for pair in by_rating.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
    }
    assert_eq!(ids(&by_rating), vec!["v1", "v4", "v0", "v2", "v6", "v5", "v3"]);

    let ascending = ranking.sorted_by_price(true);
    for pair in ascending.windows(2) {
        assert!(pair[0].base_price <= pair[1].base_price);
    }
    assert_eq!(ids(&ascending), vec!["v1", "v4", "v3", "v0", "v2", "v5", "v6"]);

    let descending = ranking.sorted_by_price(false);
    for pair in descending.windows(2) {
        assert!(pair[0].base_price >= pair[1].base_price);
    }
    assert_eq!(ids(&descending), vec!["v6", "v0", "v2", "v5", "v3", "v1", "v4"]);

    assert_eq!(ranking.sorted_by_price(false), descending);
    assert_eq!(ranking.sorted_by_rating_descending(), by_rating);
}

#[test]
fn test_lookup_after_insert_and_remove() {
    let mut ranking = sample();
    assert_eq!(ranking.find_by_id("B").map(|r| r.base_price), Some(50.0));
    assert!(ranking.find_by_id("Z").is_none());

    let removed = ranking.remove_by_id("B");
    assert_eq!(removed.map(|r| r.id), Some("B".to_string()));
    assert!(ranking.find_by_id("B").is_none());
    assert_eq!(ranking.len(), 2);

    assert!(ranking.remove_by_id("B").is_none());
    assert_eq!(ranking.len(), 2);
}

#[test]
fn test_duplicate_ids_remove_first_inserted() {
    let mut ranking = VendorRanking::new();
    ranking.insert(VendorRecord::new("dup", 1.0, 10.0));
    ranking.insert(VendorRecord::new("dup", 2.0, 20.0));

    assert_eq!(ranking.find_by_id("dup").map(|r| r.rating), Some(2.0));
    let removed = ranking.remove_by_id("dup");
    assert_eq!(removed.map(|r| r.rating), Some(1.0));
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking.iter().next().map(|r| r.rating), Some(2.0));

    ranking.remove_by_id("dup");
    assert!(ranking.find_by_id("dup").is_none());
}

#[test]
fn test_empty_ranking() {
    let ranking: VendorRanking<VendorRecord> = VendorRanking::new();
    assert!(ranking.is_empty());
    assert!(ranking.sorted_by_rating_descending().is_empty());
    assert!(ranking.sorted_by_price(true).is_empty());
    assert!(ranking.find_by_id("any").is_none());
}
