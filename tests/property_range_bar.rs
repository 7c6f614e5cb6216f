use metcast::{domain::forecast::Clip, ui::widgets::daily::bar_bounds};
use proptest::prelude::*;

fn any_fraction() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => 0.0f32..=1.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
    ]
}

proptest! {
    #[test]
    fn bar_bounds_never_overflow(
        leading in any_fraction(),
        trailing in any_fraction(),
        width in 0usize..80usize,
    ) {
        let (start, end) = bar_bounds(Clip { leading, trailing }, width);
        prop_assert!(start <= end);
        prop_assert!(end <= width);
    }

    #[test]
    fn complementary_clips_meet_in_the_middle(fraction in 0.0f32..=0.5, width in 1usize..80usize) {
        let (start, end) = bar_bounds(
            Clip {
                leading: fraction,
                trailing: 1.0 - fraction,
            },
            width,
        );
        prop_assert!(end.saturating_sub(start) <= 1);
    }
}
