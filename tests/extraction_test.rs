//! Page extraction against saved marketplace layouts

use consia::cascade::ReviewSource;
use consia::extract::{extract_payload, handle_message};
use consia::page::HtmlPage;
use consia::platform::SiteClassifier;

// ============================================================================
// Sample pages
// ============================================================================

const AMAZON_PRODUCT_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <title>Amazon.in: Buy Prestige Iris Mixer Grinder</title>
    <meta property="og:title" content="Prestige Iris 750 Watt Mixer Grinder">
</head>
<body>
    <span id="productTitle" class="a-size-large">
        Prestige Iris 750 Watt Mixer Grinder
        with 3 Stainless Steel Jars
    </span>
    <div id="corePrice_feature_div">
        <span class="a-price"><span class="a-offscreen">₹2,999.00</span><span aria-hidden="true">₹2,999</span></span>
    </div>
    <div id="cm-cr-dp-review-list">
        <div data-hook="review">
            <i data-hook="review-star-rating"><span>4.0 out of 5 stars</span></i>
            <span data-hook="review-date">Reviewed in India on 2 March 2024</span>
            <span class="a-color-state">Verified Purchase</span>
            <span data-hook="review-body" class="review-text"><span>Grinds masala finely and the jars feel sturdy.</span></span>
            <a data-hook="expand-collapse-read-more-less" href="javascript:void(0)">Read more</a>
        </div>
        <div data-hook="review">
            <span data-hook="review-body" class="review-text"><span>Motor gets loud at the highest speed but works fine.</span></span>
        </div>
        <div data-hook="review">
            <span data-hook="review-body" class="review-text"><span>Good</span></span>
        </div>
        <div data-hook="review">
            <span data-hook="review-body" class="review-text"><span>Grinds masala   finely and the jars feel sturdy.</span></span>
        </div>
        <div data-hook="review">
            <span data-hook="review-body" class="review-text"><span>12 people found this helpful and so did I, honestly</span></span>
        </div>
    </div>
    <script>var reviews = "This script text must never be read as a review";</script>
</body>
</html>
"#;

const FLIPKART_PRODUCT_HTML: &str = r#"
<html>
<head><title>boAt Rockerz 450 Bluetooth Headset Price in India - Buy Online | Flipkart.com</title></head>
<body>
    <h1 class="yhB1nd"><span class="VU-ZEz">boAt Rockerz 450 Bluetooth Headset  (Luscious Black, On the Ear)</span></h1>
    <div class="Nx9bqj CxhGGd">₹1,499</div>
    <div class="yRaY8j">₹3,990</div>
    <div class="col EPCmJX">
        <div class="ZmyHeo"><div><div class="">Sound quality is excellent and the bass is punchy for this price.</div><span class="b4x-fr">READ MORE</span></div></div>
        <p class="_2NsDsF AwS1CA">Certified Buyer, Pune</p>
    </div>
    <div class="col EPCmJX">
        <div class="ZmyHeo"><div><div class="">Ear cushions start hurting after an hour of continuous use.</div><span class="b4x-fr">READ MORE</span></div></div>
    </div>
    <div class="col EPCmJX">
        <div class="ZmyHeo"><div><div class="">Nice product</div></div></div>
    </div>
    <div class="col EPCmJX">
        <div class="ZmyHeo"><div><div class="">Battery lasted 6 months ago and now it barely holds charge.</div></div></div>
    </div>
</body>
</html>
"#;

const GENERIC_PRODUCT_HTML: &str = r#"
<html>
<head>
    <title>Kettle | Example Shop</title>
    <meta property="og:title" content="Steel Electric Kettle 1.5L">
</head>
<body>
    <h1>Electric Kettle</h1>
    <span itemprop="price" content="499.00">₹499</span>
    <div itemprop="review">
        <p itemprop="reviewBody">Boils water in about two minutes, very handy in the morning.</p>
    </div>
    <div itemprop="review">
        <p itemprop="reviewBody">The lid latch broke within a month of careful use.</p>
    </div>
    <p>Free delivery on orders above ₹299 for members</p>
</body>
</html>
"#;

const AMAZON_UNSTRUCTURED_HTML: &str = r#"
<html><body>
    <div class="custom-widget">
        <p>The blender crushes ice without any trouble. Cleaning it takes under a minute!</p>
        <p>Rated 4.5 out of 5</p>
        <p>Short one.</p>
    </div>
</body></html>
"#;

// ============================================================================
// Marketplace strategies
// ============================================================================

#[test]
fn test_amazon_product_page() {
    let mut page = HtmlPage::parse("https://www.amazon.in/Prestige-Iris/dp/B00935MD1C", AMAZON_PRODUCT_HTML);
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert_eq!(extraction.strategy, "amazon");
    assert_eq!(extraction.expanded, 1);
    assert_eq!(page.activations().len(), 1);
    assert_eq!(
        extraction.payload.title,
        "Prestige Iris 750 Watt Mixer Grinder with 3 Stainless Steel Jars"
    );
    assert_eq!(extraction.payload.price, 2999.0);

    // Short, boilerplate and whitespace-variant duplicates are gone; order is kept
    assert_eq!(
        extraction.payload.reviews,
        vec![
            "Grinds masala finely and the jars feel sturdy.".to_string(),
            "Motor gets loud at the highest speed but works fine.".to_string(),
        ]
    );
    assert!(matches!(extraction.source, ReviewSource::Structured { .. }));
}

#[test]
fn test_flipkart_product_page() {
    let mut page = HtmlPage::parse(
        "https://www.flipkart.com/boat-rockerz-450/p/itm0a9e0e6f4e1b1?pid=ACCFBN",
        FLIPKART_PRODUCT_HTML,
    );
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert_eq!(extraction.strategy, "flipkart");
    assert_eq!(
        extraction.payload.title,
        "boAt Rockerz 450 Bluetooth Headset (Luscious Black, On the Ear)"
    );
    assert_eq!(extraction.payload.price, 1499.0);
    assert_eq!(
        extraction.payload.reviews,
        vec![
            "Sound quality is excellent and the bass is punchy for this price.".to_string(),
            "Ear cushions start hurting after an hour of continuous use.".to_string(),
        ]
    );
    // READ MORE spans carry no click handler in a static page
    assert_eq!(extraction.expanded, 0);
}

#[test]
fn test_flipkart_listing_uses_listing_strategy() {
    let mut page = HtmlPage::parse(
        "https://www.flipkart.com/boat-rockerz-450/product-reviews/itm0a9e0e6f4e1b1?pid=ACCFBN",
        FLIPKART_PRODUCT_HTML,
    );
    let extraction = extract_payload(&mut page, &SiteClassifier::new());
    assert_eq!(extraction.strategy, "flipkart-reviews");
    assert_eq!(extraction.payload.reviews.len(), 2);
}

#[test]
fn test_generic_page() {
    let mut page = HtmlPage::parse("https://shop.example.com/kettle", GENERIC_PRODUCT_HTML);
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert!(extraction.is_generic());
    assert_eq!(extraction.payload.title, "Steel Electric Kettle 1.5L");
    assert_eq!(extraction.payload.price, 499.0);
    assert_eq!(
        extraction.payload.reviews,
        vec![
            "Boils water in about two minutes, very handy in the morning.".to_string(),
            "The lid latch broke within a month of careful use.".to_string(),
        ]
    );
}

// ============================================================================
// Cascade fallback
// ============================================================================

#[test]
fn test_sentence_fallback_when_no_container_matches() {
    let mut page = HtmlPage::parse("https://www.amazon.in/dp/B0BLENDER", AMAZON_UNSTRUCTURED_HTML);
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert_eq!(extraction.source, ReviewSource::SentenceFallback);
    assert_eq!(
        extraction.payload.reviews,
        vec![
            "The blender crushes ice without any trouble".to_string(),
            "Cleaning it takes under a minute".to_string(),
        ]
    );
}

#[test]
fn test_sentence_fallback_keeps_inline_markup_together() {
    let html = r#"<html><body>
        <p>This blender is <b>really</b> powerful and crushes ice easily.</p>
        <p>The <a href="/jar">glass jar</a> feels heavy but very solid!</p>
    </body></html>"#;
    let mut page = HtmlPage::parse("https://www.amazon.in/dp/B0BLENDER", html);
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert_eq!(extraction.source, ReviewSource::SentenceFallback);
    assert_eq!(
        extraction.payload.reviews,
        vec![
            "This blender is really powerful and crushes ice easily".to_string(),
            "The glass jar feels heavy but very solid".to_string(),
        ]
    );
}

#[test]
fn test_empty_page_yields_empty_payload() {
    let mut page = HtmlPage::parse("https://www.flipkart.com/x/p/itm1", "<html><body></body></html>");
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    assert_eq!(extraction.source, ReviewSource::Empty);
    assert!(extraction.payload.reviews.is_empty());
    assert_eq!(extraction.payload.price, 0.0);
    assert_eq!(extraction.payload.title, "");
}

#[test]
fn test_payload_wire_format() {
    let mut page = HtmlPage::parse("https://shop.example.com/kettle", GENERIC_PRODUCT_HTML);
    let payload = extract_payload(&mut page, &SiteClassifier::new()).payload;

    let wire = serde_json::to_value(&payload).unwrap();
    assert_eq!(wire["title"], "Steel Electric Kettle 1.5L");
    assert_eq!(wire["price"], 499.0);
    assert_eq!(wire["reviews"].as_array().map(Vec::len), Some(2));
    assert_eq!(wire.as_object().map(|o| o.len()), Some(3));
}

#[test]
fn test_page_message_protocol() {
    let classifier = SiteClassifier::new();
    let mut page = HtmlPage::parse("https://www.amazon.in/dp/B00935MD1C", AMAZON_PRODUCT_HTML);

    let reply = handle_message(&mut page, &classifier, r#"{"action": "extract"}"#).unwrap();
    assert_eq!(reply.price, 2999.0);
    assert!(handle_message(&mut page, &classifier, r#"{"action": "highlight"}"#).is_none());
}
