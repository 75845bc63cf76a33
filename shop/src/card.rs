//! Reusable card component.
//!
//! A card shows a title, optional image and subtitle, arbitrary body HTML
//! and an optional action button. Click handlers receive the card title.

use askama::Template;

/// Click handler receiving the card title
pub type ClickHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Label of the action button unless overridden
pub const DEFAULT_BUTTON_TEXT: &str = "Ver más";

/// Card configuration
pub struct CardProps {
    title: String,
    subtitle: Option<String>,
    image_url: Option<String>,
    highlighted: bool,
    button_text: String,
    body: String,
    on_card_click: Option<ClickHandler>,
    on_button_click: Option<ClickHandler>,
}

impl std::fmt::Debug for CardProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardProps")
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("image_url", &self.image_url)
            .field("highlighted", &self.highlighted)
            .field("button_text", &self.button_text)
            .field("on_card_click", &self.on_card_click.is_some())
            .field("on_button_click", &self.on_button_click.is_some())
            .finish_non_exhaustive()
    }
}

impl CardProps {
    /// Starts a card with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_url: None,
            highlighted: false,
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            body: String::new(),
            on_card_click: None,
            on_button_click: None,
        }
    }

    /// Sets the subtitle
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into()).filter(|s| !s.is_empty());
        self
    }

    /// Sets the image shown above the content
    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into()).filter(|s| !s.is_empty());
        self
    }

    /// Marks the card as highlighted
    #[must_use]
    pub const fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Overrides the button label
    #[must_use]
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = text.into();
        self
    }

    /// Sets the body; the markup is inserted unescaped
    #[must_use]
    pub fn body_html(mut self, html: impl Into<String>) -> Self {
        self.body = html.into();
        self
    }

    /// Handler for clicks anywhere on the card
    #[must_use]
    pub fn on_card_click(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_card_click = Some(Box::new(handler));
        self
    }

    /// Handler for the action button; the button is only rendered when set
    #[must_use]
    pub fn on_button_click(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_button_click = Some(Box::new(handler));
        self
    }

    /// Finishes the card
    #[must_use]
    pub fn build(self) -> Card {
        Card { props: self }
    }
}

#[derive(Template)]
#[template(path = "card.html")]
struct CardView<'a> {
    title: &'a str,
    subtitle: Option<&'a str>,
    image_url: Option<&'a str>,
    highlighted: bool,
    button_text: &'a str,
    body: &'a str,
    has_button: bool,
}

/// A configured card
#[derive(Debug)]
pub struct Card {
    props: CardProps,
}

impl Card {
    /// Card title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.props.title
    }

    /// Renders the card markup
    ///
    /// # Errors
    ///
    /// Returns the template error if rendering fails.
    pub fn render(&self) -> Result<String, askama::Error> {
        let props = &self.props;
        CardView {
            title: &props.title,
            subtitle: props.subtitle.as_deref(),
            image_url: props.image_url.as_deref(),
            highlighted: props.highlighted,
            button_text: &props.button_text,
            body: &props.body,
            has_button: props.on_button_click.is_some(),
        }
        .render()
    }

    /// Simulates a click on the card body
    pub fn click(&self) {
        if let Some(handler) = &self.props.on_card_click {
            handler(&self.props.title);
        }
    }

    /// Simulates a click on the button; the card handler is not invoked
    pub fn click_button(&self) {
        if let Some(handler) = &self.props.on_button_click {
            handler(&self.props.title);
        }
    }
}
