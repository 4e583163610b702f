use leaplist::Vector;

#[test]
fn starts_empty() {
    let vector: Vector<String> = Vector::new();
    assert!(vector.is_empty());
    assert_eq!(vector.len(), 0);
}

#[test]
fn push_preserves_order() {
    let mut vector = Vector::new();
    for i in 0..100 {
        vector.push(i);
    }

    assert_eq!(vector.len(), 100);
    for i in 0..100 {
        assert_eq!(vector.get(i), Some(&(i as i32)));
    }
}

#[test]
fn amortized_growth_keeps_contents() {
    let mut vector = Vector::with_capacity(2);
    let mut last_capacity = vector.capacity();
    let mut grew = 0;

    for i in 0..1000 {
        vector.push(i);
        if vector.capacity() != last_capacity {
            assert_eq!(vector.capacity(), last_capacity * 2);
            last_capacity = vector.capacity();
            grew += 1;
        }
    }

    // Doubling means only a handful of reallocations for a thousand pushes.
    assert!(grew <= 10);
    assert_eq!(vector.len(), 1000);
    assert!(vector.iter().copied().eq(0..1000));
}

#[test]
fn owned_elements_move_in_and_out() {
    let mut vector = Vector::new();
    vector.push("one".to_string());
    vector.push("two".to_string());

    assert_eq!(vector.pop().as_deref(), Some("two"));
    assert_eq!(vector[0], "one");
    assert_eq!(vector.len(), 1);
}

#[test]
fn slice_view_matches() {
    let vector: Vector<i32> = (1..=5).collect();
    let slice: &[i32] = &vector;
    assert_eq!(slice, &[1, 2, 3, 4, 5]);
    assert_eq!(format!("{:?}", vector), "[1, 2, 3, 4, 5]");
}
