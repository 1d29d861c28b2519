use chrono::{Datelike, NaiveDate, Weekday};

use crate::schedule::EventKey;

const PRE_FAJR: &str = "Pre-Fajr Programme:
- Tahajjud: 2-8 rakat
- Istighfar / Tawba
- Du'a — last third of the night";

const WORSHIP: &str = "Worship until Sunrise:
- Remain in dhikr from Fajr until the sun rises
- Recitation of Quran or Dala'il al-Khayrat
- Ishraq prayer once the sun is fully up";

const BITE_B: &str = "Wird Bite B (Post-Dhuhr):
- La ilaha illAllah x100
- Salawat x100: Allahumma salli ala Sayyidina Muhammad";

const BITE_C: &str = "Wird Bite C (Post-Asr):
- Surah Ya-Sin (recite or listen)
- Salawat x100: Allahumma salli ala Sayyidina Muhammad";

const BITE_D: &str = "Wird Bite D (Post-Maghrib):
- Surah al-Waqi'ah (recite or listen)
- Salawat x100: Allahumma salli ala Sayyidina Muhammad";

const BITE_E: &str = "Wird Bite E (Post-Isha):
- Surah al-Mulk (recite or listen)
- Khatm Khwajagan (weekly on Thursday night)
- Salawat x100: Allahumma salli ala Sayyidina Muhammad
- Muraqaba / Tafakkur 5-15 min";

/// Daily salawat target, raised on Monday, Thursday and Friday.
pub fn salawat_target(date: NaiveDate) -> u32 {
    match date.weekday() {
        Weekday::Mon | Weekday::Thu | Weekday::Fri => 300,
        _ => 100,
    }
}

/// Unescaped description text for an event on `date`.
pub fn description(key: EventKey, date: NaiveDate) -> String {
    match key {
        EventKey::PreFajr => PRE_FAJR.to_string(),
        EventKey::Fajr => format!(
            "Wird Bite A (Post-Fajr):
- Ayat al-Kursi x1
- Tasbih Fatimi: SubhanAllah x33, Alhamdulillah x33, Allahu Akbar x34
- Istighfar x100: Astaghfirullah
- Salawat target: {}x — Allahumma salli ala Sayyidina Muhammad",
            salawat_target(date)
        ),
        EventKey::Worship => WORSHIP.to_string(),
        EventKey::Dhuhr => BITE_B.to_string(),
        EventKey::Asr => BITE_C.to_string(),
        EventKey::Maghrib => BITE_D.to_string(),
        EventKey::Isha => BITE_E.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salawat_by_weekday() {
        // 2026-10-19 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let targets = (0..7)
            .map(|offset| salawat_target(monday + chrono::Duration::days(offset)))
            .collect::<Vec<_>>();

        assert_eq!(targets, [300, 100, 100, 300, 300, 100, 100]);
    }

    #[test]
    fn fajr_text_carries_target() {
        let tuesday = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert!(description(EventKey::Fajr, tuesday).contains("Salawat target: 100x"));
    }
}
