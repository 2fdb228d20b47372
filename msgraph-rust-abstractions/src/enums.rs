/*!
String conversion for closed and bitmask (flags) enums.

Closed enums parse a single wire name. Flags enums combine power-of-two
members and travel as a comma-separated list of names. In both cases an
unrecognized name is not an error: the service may know members that this
client predates, so parsing returns `None` and the caller treats the value
as absent.
*/

use std::fmt;

use itertools::Itertools;

/// An enum with a stable wire name per member.
pub trait GraphEnum: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Parses a wire name, `None` if the name is not a member.
    fn parse(value: &str) -> Option<Self>;
}

/// Maps enum values to their wire names, used for collections of enums.
pub fn serialize_enum_values<E: GraphEnum>(values: &[E]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Static name table of a bitmask enum, in declaration order.
pub trait FlagNames: bitflags::Flags + Copy + 'static {
    /// Wire name and single-bit value of every member
    const WIRE_NAMES: &'static [(&'static str, Self)];
}

/// Writes the names of all set members joined by commas. The empty set
/// writes nothing.
pub fn format_flags<F: FlagNames>(flags: &F, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names = F::WIRE_NAMES
        .iter()
        .filter(|(_, member)| flags.contains(*member))
        .map(|(name, _)| *name)
        .join(",");
    f.write_str(&names)
}

/// Parses a comma-separated list of member names. Any unknown name makes the
/// whole value unparseable. The empty string is the empty set.
pub fn parse_flags<F: FlagNames>(value: &str) -> Option<F> {
    if value.is_empty() {
        return Some(F::empty());
    }
    value.split(',').try_fold(F::empty(), |mut acc, token| {
        let (_, member) = F::WIRE_NAMES.iter().find(|(name, _)| *name == token)?;
        acc.insert(*member);
        Some(acc)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    bitflags::bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Access: u32 {
            const READ = 1;
            const WRITE = 2;
            const DELETE = 4;
        }
    }

    impl FlagNames for Access {
        const WIRE_NAMES: &'static [(&'static str, Self)] = &[
            ("read", Access::READ),
            ("write", Access::WRITE),
            ("delete", Access::DELETE),
        ];
    }

    impl fmt::Display for Access {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            format_flags(self, f)
        }
    }

    #[test]
    fn format_in_declaration_order() {
        assert_eq!((Access::DELETE | Access::READ).to_string(), "read,delete");
        assert_eq!(Access::empty().to_string(), "");
    }

    #[test]
    fn parse_combines_members() {
        assert_eq!(
            parse_flags::<Access>("delete,read"),
            Some(Access::READ | Access::DELETE)
        );
        assert_eq!(parse_flags::<Access>(""), Some(Access::empty()));
    }

    #[test]
    fn parse_rejects_unknown_members() {
        assert_eq!(parse_flags::<Access>("read,execute"), None);
        assert_eq!(parse_flags::<Access>("read,,write"), None);
    }
}
