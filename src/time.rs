// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Locale-aware timestamps for the header line.

use std::env;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Local;
pub use chrono::Locale;

/// The locale's date and time representations followed by the UTC offset.
const HEADER_FORMAT: &str = "%x %X %:z";

#[derive(Debug)]
pub(crate) enum Clock {
    DefaultClock,
    #[cfg(test)]
    ManualClock(DateTime<FixedOffset>),
}

impl Clock {
    pub(crate) fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::DefaultClock => Local::now().fixed_offset(),
            #[cfg(test)]
            Clock::ManualClock(now) => *now,
        }
    }
}

/// Format `now` the way the header line shows it in `locale`.
pub fn header_timestamp(now: &DateTime<FixedOffset>, locale: Locale) -> String {
    now.format_localized(HEADER_FORMAT, locale).to_string()
}

/// Parse a POSIX locale name such as `de_DE.UTF-8` or `fr_FR@euro`.
///
/// Returns `None` if the name does not denote a known locale. `C` and `POSIX` map to
/// [`Locale::POSIX`].
pub fn parse_locale(name: &str) -> Option<Locale> {
    let name = name
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    match name {
        "" => None,
        "C" | "POSIX" => Some(Locale::POSIX),
        name => Locale::try_from(name).ok(),
    }
}

/// The locale of the current process, taken from the first of `LC_ALL`, `LC_TIME` and `LANG` that
/// is set and non-empty.
///
/// Falls back to [`Locale::POSIX`] if none is set or the name is unknown.
pub fn process_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| parse_locale(&value))
        .unwrap_or(Locale::POSIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-08-10T17:12:52+08:00").unwrap()
    }

    #[test]
    fn test_manual_clock() {
        let clock = Clock::ManualClock(fixed_now());
        assert_eq!(clock.now(), fixed_now());
    }

    #[test]
    fn test_header_timestamp_follows_locale() {
        let german = header_timestamp(&fixed_now(), Locale::de_DE);
        assert!(german.contains("10.08.2024"), "{german}");
        assert!(german.contains("17:12:52"), "{german}");
        assert!(german.ends_with("+08:00"), "{german}");

        let posix = header_timestamp(&fixed_now(), Locale::POSIX);
        assert!(posix.contains("17:12:52"), "{posix}");
        assert_ne!(german, posix);
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("de_DE.UTF-8"), Some(Locale::de_DE));
        assert_eq!(parse_locale("fr_FR@euro"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("en_US"), Some(Locale::en_US));
        assert_eq!(parse_locale("C.UTF-8"), Some(Locale::POSIX));
        assert_eq!(parse_locale("POSIX"), Some(Locale::POSIX));
        assert_eq!(parse_locale(""), None);
        assert_eq!(parse_locale("xx_NOWHERE"), None);
    }
}
