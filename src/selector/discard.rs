//! Noise selectors removed by the cleaner.
//!
//! [`UNWANTED_SELECTORS`] is applied to every page; [`SITE_RULES`] adds
//! platform chrome for hostnames that contain one of the listed keys.

/// Generic unwanted-element selectors, removed unconditionally.
pub static UNWANTED_SELECTORS: &[&str] = &[
    // non-content markup
    "script",
    "style",
    "noscript",
    "template",
    "link",
    "meta",
    // embeds, except iframes from known video hosts
    r#"iframe:not([src*="youtube.com"]):not([src*="youtube-nocookie.com"]):not([src*="player.vimeo.com"]):not([src*="player.bilibili.com"])"#,
    "object",
    "embed",
    "canvas",
    "applet",
    // semantic chrome and ARIA equivalents
    "nav",
    "aside",
    "footer",
    "header",
    r#"[role="navigation"]"#,
    r#"[role="banner"]"#,
    r#"[role="complementary"]"#,
    r#"[role="contentinfo"]"#,
    r#"[role="search"]"#,
    r#"[role="menu"]"#,
    r#"[role="menubar"]"#,
    r#"[role="toolbar"]"#,
    r#"[role="dialog"]"#,
    r#"[role="alertdialog"]"#,
    // comments
    "#comments",
    "#comment",
    ".comments",
    ".comment-list",
    ".comment-section",
    ".comments-area",
    "#disqus_thread",
    "#respond",
    // sharing
    ".share",
    ".sharing",
    ".share-buttons",
    ".social-share",
    ".social-links",
    ".addtoany_share_save_container",
    r#"[class*="share-bar"]"#,
    // advertising
    ".ad",
    ".ads",
    ".advert",
    ".advertisement",
    ".adsbygoogle",
    "[data-ad-slot]",
    "[data-ad]",
    r#"[id^="ad-"]"#,
    r#"[class^="ad-"]"#,
    r#"[id*="google_ads"]"#,
    // subscription prompts
    ".subscribe",
    ".subscription",
    ".newsletter",
    r#"[class*="newsletter-"]"#,
    r#"[class*="subscribe-"]"#,
    // popups and consent
    ".popup",
    ".modal",
    ".overlay",
    r#"[aria-modal="true"]"#,
    ".cookie-consent",
    ".cookie-banner",
    "#cookie-banner",
    r#"[class*="cookie-notice"]"#,
    // forms and controls
    "form",
    "button",
    "input",
    "select",
    "textarea",
    // e-commerce
    ".add-to-cart",
    ".buy-now",
    ".product-recommend",
    ".price-box",
    // hidden elements
    "[hidden]",
    r#"[aria-hidden="true"]"#,
    r#"[style*="display:none"]"#,
    r#"[style*="display: none"]"#,
    r#"[style*="visibility:hidden"]"#,
    r#"[style*="visibility: hidden"]"#,
    // locale-specific widgets
    r#"[class*="qrcode"]"#,
    r#"[class*="qr-code"]"#,
    r#"[class*="reward"]"#,
    r#"[class*="dashang"]"#,
];

/// Hostname substring mapped to the platform chrome removed on that site.
pub struct SiteRule {
    /// Substring of the page hostname that activates the rule.
    pub host: &'static str,
    /// Selectors removed on matching hosts.
    pub selectors: &'static [&'static str],
}

/// Site-specific overrides. Purely additive: these only ever remove.
pub static SITE_RULES: &[SiteRule] = &[
    SiteRule {
        host: "zhihu.com",
        selectors: &[
            ".ContentItem-actions",
            ".RichContent-actions",
            ".FollowButton",
            ".Reward",
            ".Post-SideActions",
            ".CornerButtons",
            ".Post-topicsAndReviewer",
        ],
    },
    SiteRule {
        host: "juejin.cn",
        selectors: &[
            ".article-suspended-panel",
            ".follow-button",
            ".action-box",
            ".recommended-area",
            ".extension-banner",
        ],
    },
    SiteRule {
        host: "csdn.net",
        selectors: &[
            "#csdn-toolbar",
            ".hide-article-box",
            ".more-toolbox",
            ".recommend-box",
            ".blog-footer-bottom",
            ".left-toolbox",
        ],
    },
    SiteRule {
        host: "jianshu.com",
        selectors: &[".follow-detail", ".support-author", "._3Pnjry"],
    },
    SiteRule {
        host: "mp.weixin.qq.com",
        selectors: &[
            "#js_pc_qr_code",
            "#js_profile_qrcode",
            ".qr_code_pc",
            "#content_bottom_area",
            ".reward_area",
            "#js_tags",
        ],
    },
    SiteRule {
        host: "medium.com",
        selectors: &[
            r#"[data-testid="headerClapButton"]"#,
            r#"[data-testid="audioPlayButton"]"#,
            ".pw-multi-vote-icon",
            r#"[aria-label="responses"]"#,
        ],
    },
    SiteRule {
        host: "substack.com",
        selectors: &[".subscription-widget-wrap", ".post-footer", ".button-wrapper"],
    },
];

/// All site rules whose host key occurs in `hostname`.
pub fn rules_for_host(hostname: &str) -> impl Iterator<Item = &'static SiteRule> + '_ {
    let hostname = hostname.to_ascii_lowercase();
    SITE_RULES
        .iter()
        .filter(move |rule| hostname.contains(rule.host))
}
