//! Brute-force pixel comparison between virtual images.

use crate::foundation::core::IPoint;
use crate::surface::VirtualImage;

/// `true` when both images have the same size and identical pixels, each read relative to
/// its own bounds origin.
pub fn equals<A, B>(a: &A, b: &B) -> bool
where
    A: VirtualImage + ?Sized,
    B: VirtualImage + ?Sized,
{
    let ab = a.bounds();
    let bb = b.bounds();
    if ab.width() != bb.width() || ab.height() != bb.height() {
        return false;
    }
    equals_sub(a, IPoint::default(), b)
}

/// `true` when `needle` fits inside `haystack` at `offset` (relative to the haystack's bounds
/// origin) and every needle pixel matches the haystack pixel under it.
pub fn equals_sub<A, B>(haystack: &A, offset: IPoint, needle: &B) -> bool
where
    A: VirtualImage + ?Sized,
    B: VirtualImage + ?Sized,
{
    let hb = haystack.bounds();
    let nb = needle.bounds();
    if offset.x < 0
        || offset.y < 0
        || hb.width() - offset.x < nb.width()
        || hb.height() - offset.y < nb.height()
    {
        return false;
    }
    let dx = hb.min.x + offset.x - nb.min.x;
    let dy = hb.min.y + offset.y - nb.min.y;
    (nb.min.y..nb.max.y).all(|y| {
        (nb.min.x..nb.max.x).all(|x| haystack.color_at(x + dx, y + dy) == needle.color_at(x, y))
    })
}

/// First placement of `needle` inside `haystack`, scanning rows from `start.y` and columns
/// from `start.x` in row-major order.
///
/// Offsets are relative to the haystack's bounds origin.
pub fn search<A, B>(haystack: &A, start: IPoint, needle: &B) -> Option<IPoint>
where
    A: VirtualImage + ?Sized,
    B: VirtualImage + ?Sized,
{
    let hb = haystack.bounds();
    let nb = needle.bounds();
    let columns = hb.width() - nb.width() + 1;
    let rows = hb.height() - nb.height() + 1;
    (start.y.max(0)..rows)
        .flat_map(|y| (start.x.max(0)..columns).map(move |x| IPoint::new(x, y)))
        .find(|&p| equals_sub(haystack, p, needle))
}

#[cfg(test)]
#[path = "../tests/unit/pattern/pattern.rs"]
mod tests;
