//! A small Center City registry used across harnesses.

use super::builders::AddressRecordBuilder;
use ais_core::AddressRecord;

/// Page size used by [`center_city`]-backed services.
pub const FIXTURE_PAGE_SIZE: usize = 2;

/// Records on Market St (1200 block, one ranged address with units),
/// S Broad St and Chestnut St. Only even-numbered Market addresses carry an
/// OPA account.
pub fn center_city() -> Vec<AddressRecord> {
    vec![
        AddressRecordBuilder::new(1234, "MARKET")
            .suffix("ST")
            .account("881234000")
            .owners("SMITH JOHN|DOE JANE")
            .geocode("pwd_parcel", -75.1611, 39.9522)
            .recycling_rate("42.1234")
            .build(),
        AddressRecordBuilder::new(1234, "MARKET")
            .suffix("ST")
            .high(1236)
            .account("881234036")
            .owners("MARKET PARTNERS LLC")
            .build(),
        AddressRecordBuilder::new(1235, "MARKET")
            .suffix("ST")
            .unit("UNIT", "1")
            .owners("ROE RICHARD")
            .build(),
        AddressRecordBuilder::new(1235, "MARKET")
            .suffix("ST")
            .unit("UNIT", "2")
            .owners("ROE RICHARD|ROE ANN")
            .build(),
        AddressRecordBuilder::new(1250, "MARKET")
            .suffix("ST")
            .account("881250000")
            .owners("SMITH JANE")
            .build(),
        AddressRecordBuilder::new(1301, "MARKET")
            .suffix("ST")
            .owners("SMITH ALEX")
            .build(),
        AddressRecordBuilder::new(10, "BROAD")
            .predir("S")
            .suffix("ST")
            .account("888000010")
            .owners("CITY OF PHILADELPHIA")
            .geocode("true_range", -75.1636, 39.9513)
            .build(),
        AddressRecordBuilder::new(1600, "CHESTNUT")
            .suffix("ST")
            .account("881600000")
            .build(),
    ]
}
