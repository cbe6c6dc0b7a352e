mod category;
mod kind;
mod record;

pub use self::category::Category;
pub use self::kind::RecordKind;
pub use self::record::Record;
