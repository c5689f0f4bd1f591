use super::*;

#[test]
fn test_heap_deref() {
    let h = Heap::new(42i64);
    assert_eq!(*h, 42);
}

#[test]
fn test_heap_clone_shares_allocation() {
    let h1 = Heap::new(vec![1, 2, 3]);
    let h2 = h1.clone();
    assert_eq!(*h1, *h2);
    assert!(h1.ptr_eq(&h2));
}

#[test]
fn test_heap_eq_is_structural() {
    let h1: Heap<str> = Heap::from_arc(Arc::from("hello"));
    let h2: Heap<str> = Heap::from_arc(Arc::from("hello"));
    let h3: Heap<str> = Heap::from_arc(Arc::from("world"));
    assert_eq!(h1, h2);
    assert!(!h1.ptr_eq(&h2));
    assert_ne!(h1, h3);
}
