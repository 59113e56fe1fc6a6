//! Two-pointer merge of ascending sequences

/// Merge ascending `list` and `received` into `out`
///
/// `out` is cleared first and reused, so a caller that keeps swapping buffers
/// never reallocates once `out` has grown to the final size. On equal heads
/// the element from `list` goes first, which keeps the merge stable.
///
/// # Example
///
/// ```
/// use primepulse::reduce::merge::merge_into;
///
/// let mut out = Vec::new();
/// merge_into(&[3, 11, 17], &[5, 7, 13], &mut out);
/// assert_eq!(out, vec![3, 5, 7, 11, 13, 17]);
/// ```
pub fn merge_into<T: Ord + Copy>(list: &[T], received: &[T], out: &mut Vec<T>) {
    out.clear();
    out.reserve(list.len() + received.len());

    let (mut a, mut b) = (0, 0);
    while a < list.len() && b < received.len() {
        if list[a] <= received[b] {
            out.push(list[a]);
            a += 1;
        } else {
            out.push(received[b]);
            b += 1;
        }
    }

    // Tail of whichever side is left
    out.extend_from_slice(&list[a..]);
    out.extend_from_slice(&received[b..]);
}
