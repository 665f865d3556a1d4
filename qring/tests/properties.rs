//! Randomized checks of queue invariants.

use qring::{Queue, handle};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_word(rng: &mut SmallRng) -> String {
    let len = rng.random_range(0..4);
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..3u8)))
        .collect()
}

fn snapshot(q: &Queue) -> Vec<String> {
    q.validate().unwrap();
    q.iter().map(|v| v.unwrap_or_default().to_owned()).collect()
}

fn filled(rng: &mut SmallRng, n: usize) -> Queue {
    let mut q = Queue::builder().capacity(n.max(1)).seed(rng.random()).build().unwrap();
    let words: Vec<String> = (0..n).map(|_| random_word(rng)).collect();
    q.extend_tail(&words).unwrap();
    q
}

#[test]
fn size_tracks_inserts_minus_removes() {
    let mut rng = SmallRng::seed_from_u64(12345);
    let mut q = Queue::builder().capacity(256).seed(1).build().unwrap();
    let mut expected = 0usize;

    for _ in 0..10_000 {
        match rng.random_range(0..4) {
            0 => {
                if q.insert_head(Some(&random_word(&mut rng))).is_ok() {
                    expected += 1;
                }
            }
            1 => {
                if q.insert_tail(Some(&random_word(&mut rng))).is_ok() {
                    expected += 1;
                }
            }
            2 => {
                if q.remove_head(None).is_some() {
                    expected -= 1;
                }
            }
            _ => {
                let mut buf = [0u8; 2];
                if q.remove_tail(Some(&mut buf)).is_some() {
                    expected -= 1;
                    assert_eq!(buf[1], 0);
                }
            }
        }
        assert_eq!(q.len(), expected);
        assert_eq!(q.is_empty(), expected == 0);
    }

    assert_eq!(q.validate(), Ok(expected));
}

#[test]
fn reverse_is_self_inverse() {
    let mut rng = SmallRng::seed_from_u64(1);
    for n in [0, 1, 2, 3, 17, 64] {
        let mut q = filled(&mut rng, n);
        let before = snapshot(&q);

        q.reverse();
        let mut reversed = before.clone();
        reversed.reverse();
        assert_eq!(snapshot(&q), reversed);

        q.reverse();
        assert_eq!(snapshot(&q), before);
    }
}

#[test]
fn sort_is_ordered_and_idempotent() {
    let mut rng = SmallRng::seed_from_u64(2);
    for n in [0, 1, 2, 5, 31, 32, 33, 500] {
        let mut q = filled(&mut rng, n);
        let mut expected = snapshot(&q);
        expected.sort();

        q.sort();
        let once = snapshot(&q);
        assert_eq!(once, expected);

        q.sort();
        assert_eq!(snapshot(&q), once);
    }
}

#[test]
fn sort_then_dedup_leaves_no_adjacent_equal() {
    let mut rng = SmallRng::seed_from_u64(3);
    for n in [1, 2, 10, 100, 400] {
        let mut q = filled(&mut rng, n);
        let original = snapshot(&q);

        q.sort();
        q.delete_duplicates().unwrap();
        let deduped = snapshot(&q);

        assert!(deduped.windows(2).all(|w| w[0] < w[1]));
        // survivors are exactly the values that occurred once
        for value in &deduped {
            assert_eq!(original.iter().filter(|v| *v == value).count(), 1);
        }
        for value in &original {
            let once = original.iter().filter(|v| *v == value).count() == 1;
            assert_eq!(deduped.contains(value), once);
        }
    }
}

#[test]
fn shuffle_preserves_multiset() {
    let mut rng = SmallRng::seed_from_u64(4);
    for n in [0, 1, 2, 3, 50, 333] {
        let mut q = filled(&mut rng, n);
        let mut before = snapshot(&q);

        q.shuffle();
        let mut after = snapshot(&q);

        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}

#[test]
fn swap_pairs_twice_restores_order() {
    let mut rng = SmallRng::seed_from_u64(5);
    for n in [0, 1, 2, 7, 8] {
        let mut q = filled(&mut rng, n);
        let before = snapshot(&q);
        q.swap_pairs();
        q.swap_pairs();
        assert_eq!(snapshot(&q), before);
    }
}

#[test]
fn delete_middle_until_empty() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut q = filled(&mut rng, 25);
    let mut model = snapshot(&q);

    while !model.is_empty() {
        q.delete_middle().unwrap();
        model.remove(model.len() / 2);
        assert_eq!(snapshot(&q), model);
    }
    assert!(q.delete_middle().is_err());
}

#[test]
fn handle_api_scenario() {
    let mut q = handle::queue_new();
    for value in ["banana", "apple", "cherry", "apple"] {
        assert!(handle::insert_tail(q.as_mut(), Some(value)));
    }

    handle::sort(q.as_mut());
    assert!(handle::delete_duplicates(q.as_mut()));
    assert_eq!(handle::size(q.as_ref()), 2);

    let mut buf = [0xffu8; 4];
    let e = handle::remove_head(q.as_mut(), Some(&mut buf)).unwrap();
    assert_eq!(e.value(), Some("banana"));
    assert_eq!(&buf, b"ban\0");
    handle::element_release(e);

    handle::queue_free(q);
}
