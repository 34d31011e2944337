mod css_to_esm_tests;
mod optimizer_tests;
