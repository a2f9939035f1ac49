/// Which clock an operation addresses
///
/// `Default` always means the stopwatch's configured default clock, so a
/// clock that is literally named `""` is still reachable as `Named("")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockRef<'a> {
    #[default]
    Default,
    Named(&'a str),
}

impl<'a> From<&'a str> for ClockRef<'a> {
    fn from(name: &'a str) -> Self {
        ClockRef::Named(name)
    }
}

impl<'a> From<&'a String> for ClockRef<'a> {
    fn from(name: &'a String) -> Self {
        ClockRef::Named(name.as_str())
    }
}

impl<'a> From<Option<&'a str>> for ClockRef<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(ClockRef::Default, ClockRef::Named)
    }
}

impl<'a> ClockRef<'a> {
    /// The clock name this reference resolves to
    pub fn resolve(self, default_name: &'a str) -> &'a str {
        match self {
            ClockRef::Default => default_name,
            ClockRef::Named(name) => name,
        }
    }
}
