use super::*;

#[test]
fn pops_smallest_priority_first() {
    let mut q = PriorityQueue::new();
    q.push(3.0, "c");
    q.push(1.0, "a");
    q.push(2.0, "b");
    let order: Vec<_> = std::iter::from_fn(|| q.pop().map(PriorityEntry::into_value)).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
}

#[test]
fn equal_priorities_keep_insertion_order() {
    let mut q = PriorityQueue::new();
    for v in 0..5 {
        q.push(1.0, v);
    }
    let order: Vec<_> = std::iter::from_fn(|| q.pop().map(PriorityEntry::into_value)).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn pop_due_respects_limit() {
    let mut q = PriorityQueue::new();
    q.push(10.0, 'x');
    q.push(20.0, 'y');
    assert!(q.pop_due(5.0).is_none());
    assert_eq!(q.pop_due(10.0).map(|e| *e.value()), Some('x'));
    assert!(q.pop_due(15.0).is_none());
    assert_eq!(q.len(), 1);
    assert_eq!(q.peek().map(PriorityEntry::priority), Some(20.0));
    q.clear();
    assert!(q.is_empty());
}
