use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centered within `area`.  Returns `None`
/// if `area` is too small to hold it.
pub(crate) fn center_rect(area: Rect, size: Size) -> Option<Rect> {
    if size.width > area.width || size.height > area.height {
        return None;
    }
    let [inner] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [inner] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(inner);
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(20, 10), Some(Rect::new(30, 7, 20, 10)))]
    #[case(Rect::new(5, 3, 20, 10), Size::new(20, 10), Some(Rect::new(5, 3, 20, 10)))]
    #[case(Rect::new(0, 0, 80, 24), Size::new(81, 10), None)]
    #[case(Rect::new(0, 0, 80, 24), Size::new(20, 25), None)]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Option<Rect>) {
        assert_eq!(center_rect(area, size), r);
    }
}
