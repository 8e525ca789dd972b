pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_item, prompt_line, prompt_merchant, prompt_observation, prompt_quantity,
    prompt_selections, prompt_shop_action, prompt_text, prompt_yes_no, ShopAction,
};
pub use render::{describe_item, describe_line, display_cart, display_menu, display_merchants};
