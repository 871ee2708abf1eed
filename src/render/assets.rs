//! Fixed badge assets compiled into the binary

use std::sync::LazyLock;

use crate::domain::Source;
use crate::inline::data_uri;

/// Badge canvas width in pixels
pub const BADGE_WIDTH: u32 = 300;
/// Badge canvas height in pixels
pub const BADGE_HEIGHT: u32 = 135;

pub const STYLESHEET: &str = r"<style>
.grid-item {
    width: 300px;
    border-bottom: 1px solid rgba(236, 236, 236, 1);
    display: grid;
    grid-template-columns: auto auto auto;
    align-items: center;
    padding-bottom: 10px;
}

.grid-item-image {
    width: 50px;
    height: 50px;
}

.grid-item-info {
    width: 125px;
    display: inline;
    margin-left: 10px;
}

.grid-item-title {
    font-weight: bold;
}

.grid-item-caption {
    font-size: 12px
}

.grid-item-link {
    margin-left: 10px;
}
p {
    margin: 0;
}
</style>";

static APP_STORE_CTA: LazyLock<String> = LazyLock::new(|| {
    data_uri(
        Some("image/png"),
        include_bytes!("../../assets/appstore-cta.png"),
    )
});

static PLAY_STORE_CTA: LazyLock<String> = LazyLock::new(|| {
    data_uri(
        Some("image/png"),
        include_bytes!("../../assets/playstore-cta.png"),
    )
});

/// "Download on the App Store" / "Get it on Google Play" image for `source`
pub fn call_to_action(source: Source) -> &'static str {
    match source {
        Source::AppStore => APP_STORE_CTA.as_str(),
        Source::PlayStore => PLAY_STORE_CTA.as_str(),
    }
}
