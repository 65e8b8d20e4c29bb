use clap::ValueEnum;
use strum::{Display, EnumString, VariantArray};

/// Constraint for filtering a list of integers.
///
/// `All` is the "no filter" constraint and restores the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, VariantArray, ValueEnum)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NumberFilter {
	#[default]
	All,
	Negative,
	Positive,
	Even,
	Odd,
}

impl NumberFilter {
	/// Whether `value` passes this constraint.
	///
	/// Parity is decided on the low bit, so zero is even and negative odd
	/// numbers are odd.
	pub const fn matches(self, value: i64) -> bool {
		match self {
			Self::All => true,
			Self::Negative => value < 0,
			Self::Positive => value > 0,
			Self::Even => value & 1 == 0,
			Self::Odd => value & 1 != 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::ValueEnum;
	use proptest::prelude::*;
	use rstest::rstest;
	use strum::VariantArray;

	use super::NumberFilter;

	#[rstest]
	#[case(NumberFilter::All, -7, true)]
	#[case(NumberFilter::Negative, -1, true)]
	#[case(NumberFilter::Negative, 0, false)]
	#[case(NumberFilter::Positive, 0, false)]
	#[case(NumberFilter::Positive, 1, true)]
	#[case(NumberFilter::Even, 0, true)]
	#[case(NumberFilter::Even, -2, true)]
	#[case(NumberFilter::Even, -1, false)]
	#[case(NumberFilter::Odd, -1, true)]
	#[case(NumberFilter::Odd, i64::MIN, false)]
	#[case(NumberFilter::Odd, i64::MAX, true)]
	fn predicate_table(#[case] filter: NumberFilter, #[case] value: i64, #[case] expected: bool) {
		assert_eq!(filter.matches(value), expected, "{filter}({value})");
	}

	#[rstest]
	#[case("all", NumberFilter::All)]
	#[case("Even", NumberFilter::Even)]
	#[case("NEGATIVE", NumberFilter::Negative)]
	fn parses_case_insensitively(#[case] text: &str, #[case] expected: NumberFilter) {
		assert_eq!(text.parse::<NumberFilter>().unwrap(), expected);
	}

	#[test]
	fn display_round_trips_every_variant() {
		for &filter in NumberFilter::VARIANTS {
			assert_eq!(filter.to_string().parse::<NumberFilter>().unwrap(), filter);
		}
		assert!("zero".parse::<NumberFilter>().is_err());
	}

	#[test]
	fn cli_values_match_display_names() {
		assert_eq!(NumberFilter::value_variants(), NumberFilter::VARIANTS);
		for filter in NumberFilter::VARIANTS {
			let value = filter.to_possible_value().unwrap();
			assert_eq!(value.get_name(), filter.to_string());
			assert_eq!(<NumberFilter as ValueEnum>::from_str(value.get_name(), true), Ok(*filter));
		}
	}

	proptest! {
		#[test]
		fn parity_partitions_every_value(value in any::<i64>()) {
			prop_assert_ne!(NumberFilter::Even.matches(value), NumberFilter::Odd.matches(value));
		}

		#[test]
		fn sign_filters_exclude_only_zero(value in any::<i64>()) {
			let signed = NumberFilter::Negative.matches(value) || NumberFilter::Positive.matches(value);
			prop_assert_eq!(signed, value != 0);
			prop_assert!(!(NumberFilter::Negative.matches(value) && NumberFilter::Positive.matches(value)));
		}
	}
}
