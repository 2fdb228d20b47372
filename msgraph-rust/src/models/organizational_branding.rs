use super::{Entity, Entityable};

graph_model! {
    /// Sign-in page branding shared by the default branding and its
    /// localizations
    pub struct OrganizationalBrandingProperties: Entity {
        subtypes AnyOrganizationalBrandingProperties {
            "#microsoft.graph.organizationalBranding" => OrganizationalBranding,
            "#microsoft.graph.organizationalBrandingLocalization" => OrganizationalBrandingLocalization,
        }
        properties {
            /// Color shown in place of the background image on low
            /// bandwidth connections, `#RRGGBB`
            background_color: String = "backgroundColor",
            /// Image shown behind the sign-in page, at most 300 KB
            background_image: Vec<u8> = "backgroundImage",
            background_image_relative_url: String = "backgroundImageRelativeUrl",
            banner_logo: Vec<u8> = "bannerLogo",
            banner_logo_relative_url: String = "bannerLogoRelativeUrl",
            /// CDNs serving the assets, in order of preference. Read-only.
            cdn_list: Vec<String> = "cdnList",
            custom_account_reset_credentials_url: String = "customAccountResetCredentialsUrl",
            custom_cannot_access_your_account_text: String = "customCannotAccessYourAccountText",
            custom_cannot_access_your_account_url: String = "customCannotAccessYourAccountUrl",
            custom_css: Vec<u8> = "customCSS",
            custom_css_relative_url: String = "customCSSRelativeUrl",
            custom_forgot_my_password_text: String = "customForgotMyPasswordText",
            custom_privacy_and_cookies_text: String = "customPrivacyAndCookiesText",
            custom_privacy_and_cookies_url: String = "customPrivacyAndCookiesUrl",
            custom_reset_it_now_text: String = "customResetItNowText",
            custom_terms_of_use_text: String = "customTermsOfUseText",
            custom_terms_of_use_url: String = "customTermsOfUseUrl",
            favicon: Vec<u8> = "favicon",
            favicon_relative_url: String = "faviconRelativeUrl",
            header_background_color: String = "headerBackgroundColor",
            header_logo: Vec<u8> = "headerLogo",
            header_logo_relative_url: String = "headerLogoRelativeUrl",
            /// Text shown at the bottom of the sign-in box
            sign_in_page_text: String = "signInPageText",
            square_logo: Vec<u8> = "squareLogo",
            square_logo_dark: Vec<u8> = "squareLogoDark",
            square_logo_dark_relative_url: String = "squareLogoDarkRelativeUrl",
            square_logo_relative_url: String = "squareLogoRelativeUrl",
            /// Hint shown in the username text box
            username_hint_text: String = "usernameHintText",
        }
    }
}

graph_model! {
    /// Default branding of a tenant
    pub struct OrganizationalBranding: OrganizationalBrandingProperties, Entity {
        discriminator = "#microsoft.graph.organizationalBranding";
        properties {
            localizations: Vec<OrganizationalBrandingLocalization> = "localizations",
        }
    }
}

graph_model! {
    /// Branding for one locale, the locale is the `id`
    pub struct OrganizationalBrandingLocalization: OrganizationalBrandingProperties, Entity {
        discriminator = "#microsoft.graph.organizationalBrandingLocalization";
        properties {}
    }
}
