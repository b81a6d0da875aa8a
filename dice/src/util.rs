/// Cyclic rotation. Positive `n` moves the last `n` elements to the front;
/// negative `n` moves the first `|n|` elements to the back.
pub fn rotate<T: Clone>(items: &[T], n: isize) -> Vec<T> {
    let mut out = items.to_vec();
    if out.is_empty() {
        return out;
    }
    let k = n.unsigned_abs() % out.len();
    if n >= 0 {
        out.rotate_right(k);
    } else {
        out.rotate_left(k);
    }
    out
}
