pub mod a001_cookie_consent;
