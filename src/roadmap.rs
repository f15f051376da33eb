use crate::{Difficulty, RoadmapModule, Topic};

fn topic(title: &str, description: &str, pattern: Option<&str>) -> Topic {
    Topic {
        title: title.to_string(),
        description: description.to_string(),
        pattern: pattern.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn module(
    id: &str,
    number: &str,
    title: &str,
    icon: &str,
    difficulty: Difficulty,
    estimated_time: &str,
    prerequisites: &[&str],
    description: &str,
    topics: Vec<Topic>,
) -> RoadmapModule {
    RoadmapModule {
        id: id.to_string(),
        number: number.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        difficulty,
        estimated_time: estimated_time.to_string(),
        prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
        description: description.to_string(),
        topics,
    }
}

/// The curriculum. Built once at startup; completion state lives in the
/// preference store, never here.
pub(crate) fn modules() -> Vec<RoadmapModule> {
    use Difficulty::{Advanced, Beginner, Intermediate};
    vec![
        module(
            "00-foundations", "00", "Foundations", "layers", Beginner, "2-3 hours", &[],
            "Master the building blocks - understand what makes systems scale and why certain patterns exist.",
            vec![
                topic("System Design Overview", "Goals, trade-offs, and the 'Scale vs. Complexity' curve", None),
                topic("Core Metrics", "Scalability, Latency (P99/P99.9), Throughput, Reliability, and Availability", None),
                topic("Networking", "TCP/UDP, QUIC/HTTP3, DNS, and Anycast Load Balancing", None),
                topic("Consistent Hashing", "Distributed data partitioning without central coordination", None),
                topic("Bloom Filters", "Probabilistic data structures for membership testing", Some("bloom-filter")),
                topic("Skip Lists", "Fast search in ordered sequences", None),
                topic("Merkle Trees", "Efficient data verification in distributed systems", None),
            ],
        ),
        module(
            "01-requirements", "01", "Requirements & Constraints", "file-text", Beginner, "1-2 hours",
            &["00-foundations"],
            "Learn to translate business needs into technical specifications and calculate realistic capacity needs.",
            vec![
                topic("Functional vs Non-functional", "What the system does vs how well it does it", None),
                topic("Capacity Planning", "Back-of-the-envelope estimations for DAU, Storage, and Bandwidth", None),
                topic("Latency Budgeting", "Calculating the 'Time to First Byte' across distributed hops", None),
                topic("API Contracts", "Defining strict schemas with Protocol Buffers and OpenAPI", None),
            ],
        ),
        module(
            "02-patterns", "02", "Core Architectural Patterns", "grid", Intermediate, "3-4 hours",
            &["00-foundations", "01-requirements"],
            "Understand the fundamental patterns that shape modern system architectures.",
            vec![
                topic("Modular Monoliths", "When NOT to use microservices - the 'Microservices First' trap", None),
                topic("Event-Driven Architecture", "Async communication, Sagas, and Change Data Capture (CDC)", None),
                topic("Serverless Patterns", "FaaS economics and when Lambda/Cloud Functions make sense", None),
            ],
        ),
        module(
            "03-scalability", "03", "Scalability Patterns", "trending-up", Intermediate, "4-5 hours",
            &["02-patterns"],
            "Scale from thousands to millions of users - learn horizontal scaling, caching, and queuing patterns.",
            vec![
                topic("Horizontal Scaling", "The 'Shared Nothing' architecture and load distribution", None),
                topic("Database Sharding", "Vertical vs Horizontal Sharding and Rebalancing strategies", None),
                topic("Caching Strategies", "CDN Edge, Redis/Memcached patterns, and Cache Invalidation", None),
                topic("Message Queues", "Kafka vs RabbitMQ vs SQS - when to use which", None),
            ],
        ),
        module(
            "04-data", "04", "Data Storage & Consistency", "database", Advanced, "5-6 hours",
            &["03-scalability"],
            "Master database internals, consistency models, and replication strategies for distributed data.",
            vec![
                topic("ACID vs BASE vs NewSQL", "When to use Postgres vs MongoDB vs CockroachDB", None),
                topic("Consistency Models", "Linearizability, Sequential, and Eventual Consistency trade-offs", Some("distributed-consensus")),
                topic("LSM-Tree Storage", "How modern databases achieve write performance", Some("lsm-tree")),
                topic("Multi-Region Replication", "Quorum-based writes and conflict resolution", None),
                topic("Disaster Recovery", "PITR (Point-in-Time Recovery) and backup strategies", None),
            ],
        ),
        module(
            "05-api", "05", "API Design & Microservices", "share-2", Intermediate, "3-4 hours",
            &["02-patterns"],
            "Design robust APIs and build resilient microservice architectures.",
            vec![
                topic("REST vs GraphQL vs gRPC", "Choosing the right API protocol for your use case", None),
                topic("API Gateway", "Authentication offloading, SSL termination, and BFF pattern", None),
                topic("Rate Limiting", "Token bucket vs Leaky bucket algorithms", None),
                topic("Circuit Breaker", "Preventing cascade failures in distributed systems", None),
            ],
        ),
        module(
            "06-observability", "06", "Observability & Monitoring", "activity", Intermediate, "3-4 hours",
            &["05-api"],
            "Build production-ready systems with comprehensive logging, metrics, and tracing.",
            vec![
                topic("Structured Logging", "OpenTelemetry and Distributed Tracing with Jaeger/Zipkin", None),
                topic("SLIs/SLOs/SLAs", "Defining and monitoring service level objectives", None),
                topic("Chaos Engineering", "Injecting latency/failure in production safely", None),
            ],
        ),
        module(
            "07-reliability", "07", "Fault Tolerance & Reliability", "shield", Advanced, "4-5 hours",
            &["06-observability"],
            "Design systems that survive failures - redundancy, degradation, and recovery patterns.",
            vec![
                topic("Redundancy Patterns", "N+1, Active-Active multi-region deployments", None),
                topic("Graceful Degradation", "Designing 'Fail-Soft' features and Load Shedding", None),
                topic("Idempotency", "Safe retries in distributed systems", None),
                topic("Saga Pattern", "Distributed transactions and compensation logic", None),
            ],
        ),
        module(
            "08-edge", "08", "Edge Computing & CDN", "globe", Advanced, "3-4 hours",
            &["03-scalability"],
            "Push computation to the edge - reduce latency and improve user experience globally.",
            vec![
                topic("Edge Functions", "Running WASM at the edge (Cloudflare Workers/Fastly)", None),
                topic("Geo-Routing", "Latency-based routing and Regional Data Sovereignty", None),
                topic("CDN Strategies", "Cache invalidation and origin shielding", None),
            ],
        ),
        module(
            "09-security", "09", "Security at Scale", "lock", Intermediate, "3-4 hours",
            &["05-api"],
            "Secure your systems - authentication, authorization, and encryption patterns.",
            vec![
                topic("OAuth2 & OIDC", "Modern authentication flows and JWT best practices", None),
                topic("Zero-Trust Architecture", "ZTNA and never trusting the network", None),
                topic("Encryption Patterns", "At Rest (KMS/HSM) and in Transit (mTLS)", None),
            ],
        ),
        module(
            "10-cloud", "10", "Cloud Native Architecture", "cloud", Advanced, "5-6 hours",
            &["05-api", "07-reliability"],
            "Master containers, orchestration, and infrastructure-as-code for cloud-native systems.",
            vec![
                topic("Kubernetes Internals", "Pods, Services, Deployments, and when NOT to use K8s", None),
                topic("Service Mesh", "Istio/Linkerd for traffic management and observability", None),
                topic("GitOps", "Infrastructure as Code with Terraform/Crossplane and ArgoCD", None),
            ],
        ),
        module(
            "11-streaming", "11", "Real-time & Stream Processing", "radio", Advanced, "4-5 hours",
            &["04-data"],
            "Build real-time systems - streaming data pipelines and event processing at scale.",
            vec![
                topic("WebSockets vs SSE", "Choosing the right protocol for real-time communication", None),
                topic("Kafka Streams", "State management in stream processing", None),
                topic("Flink & Spark", "Batch vs stream processing trade-offs", None),
            ],
        ),
        module(
            "12-ai", "12", "AI/ML Infrastructure", "brain", Advanced, "5-6 hours",
            &["04-data", "11-streaming"],
            "Build AI-powered systems - vector search, RAG pipelines, and LLM inference at scale.",
            vec![
                topic("Vector Databases", "Pinecone, Milvus, Weaviate - similarity search patterns", None),
                topic("RAG Architecture", "Building Embedding Pipelines and Retrieval-Augmented Generation", None),
                topic("LLM Serving", "High throughput inference and minimizing TTFT (Time to First Token)", None),
            ],
        ),
        module(
            "13-optimization", "13", "Cost & Performance", "zap", Advanced, "4-5 hours",
            &["10-cloud"],
            "Optimize for cost and performance - profiling, tuning, and FinOps strategies.",
            vec![
                topic("FinOps Strategies", "Cost-effective architectures and Spot Instance optimization", None),
                topic("Performance Profiling", "JVM/Go/Rust profiling and bottleneck identification", None),
                topic("Kernel Tuning", "Linux performance tuning with eBPF", None),
            ],
        ),
        module(
            "14-casestudies", "14", "Real-World Case Studies", "book-open", Intermediate, "6-8 hours",
            &["03-scalability", "04-data", "05-api"],
            "Learn from the best - analyze how top companies solve complex system design problems.",
            vec![
                topic("Amazon Order Management", "Distributed transactions at e-commerce scale", None),
                topic("Netflix CDN", "Microservices and content delivery architecture", None),
                topic("TikTok Recommendation", "Real-time ML inference and Push vs Pull models", None),
                topic("Uber Real-time Maps", "Geospatial indexing and location tracking", None),
            ],
        ),
        module(
            "15-capstone", "15", "Capstone Projects", "award", Advanced, "10-15 hours",
            &["04-data", "07-reliability", "11-streaming"],
            "Apply everything you've learned - design complete systems from scratch.",
            vec![
                topic("Design a Global Chat", "Multi-region WebSocket synchronization with consistency", None),
                topic("Design a Payment System", "Distributed transactions, idempotency, and fraud detection", None),
                topic("Design a Multiplayer Game", "Real-time state synchronization with UDP/QUIC", None),
                topic("Design a Search Engine", "Distributed crawling, indexing, and vector search", None),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_ids_are_unique_and_numbered_in_order() {
        let all = modules();
        assert_eq!(all.len(), 16);
        for (i, module) in all.iter().enumerate() {
            assert_eq!(module.number, format!("{i:02}"));
            assert!(all.iter().filter(|m| m.id == module.id).count() == 1);
        }
    }

    #[test]
    fn prerequisites_reference_existing_modules() {
        let all = modules();
        for module in &all {
            for prereq in &module.prerequisites {
                assert!(
                    all.iter().any(|m| &m.id == prereq),
                    "{} requires unknown module {prereq}",
                    module.id
                );
            }
        }
    }
}
