pub struct Icons;

impl Icons {
    pub const WRENCH: &str = "🔧";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const PERSON: &str = "👤";
    pub const PHONE: &str = "📱";
    pub const FILE: &str = "📄";
}
